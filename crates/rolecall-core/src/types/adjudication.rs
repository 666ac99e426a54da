//! Persisted adjudication records and the human-facing status lifecycle.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::confidence::Confidence;

/// Lifecycle status. Only human action changes it; any transition is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleStatus {
    Pending,
    Confirmed,
    Deliverable,
    Rejected,
}

impl RoleStatus {
    pub const ALL: [RoleStatus; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Deliverable,
        Self::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Deliverable => "deliverable",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "deliverable" => Some(Self::Deliverable),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Confirmed and deliverable both accept the role as genuine.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Deliverable)
    }
}

impl std::fmt::Display for RoleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The durable record per canonical role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjudicatedRole {
    /// Normalized canonical name; unique, case-insensitive identity.
    pub key: String,
    pub canonical_name: String,
    pub status: RoleStatus,
    pub category: Option<String>,
    pub function_tags: BTreeSet<String>,
    pub notes: Option<String>,
    pub aliases: BTreeSet<String>,
    pub mention_count: u64,
    pub document_ids: BTreeSet<String>,
    pub sample_contexts: Vec<String>,
    /// Highest automatic confidence ever recorded for this role.
    pub max_confidence: Confidence,
    pub is_deliverable: bool,
    pub created_at: i64,
    pub updated_at: i64,
    /// Last human to act on the row. `None` until a reviewer touches it.
    pub updated_by: Option<String>,
}

/// Human-editable details. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleDetails {
    pub category: Option<String>,
    pub notes: Option<String>,
    pub function_tags: Option<BTreeSet<String>>,
}

/// One row of the status audit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub key: String,
    pub from_status: RoleStatus,
    pub to_status: RoleStatus,
    pub changed_by: String,
    pub changed_at: i64,
}

/// Filter for adjudication queries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleFilter {
    pub status: Option<RoleStatus>,
    pub category: Option<String>,
    pub has_notes: Option<bool>,
    pub has_tags: Option<bool>,
    /// Case-insensitive substring over name, aliases and notes.
    pub text: Option<String>,
}

impl RoleFilter {
    pub fn with_status(mut self, status: RoleStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_notes(mut self, has_notes: bool) -> Self {
        self.has_notes = Some(has_notes);
        self
    }

    pub fn with_tags(mut self, has_tags: bool) -> Self {
        self.has_tags = Some(has_tags);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
