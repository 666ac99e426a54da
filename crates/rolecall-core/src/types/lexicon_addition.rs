//! Lexicon entries learned from human adjudication.

use serde::{Deserialize, Serialize};

/// Which lexicon dictionary an addition extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionKind {
    /// A known role title or alias.
    KnownRole,
    /// A term that must never validate.
    Exclusion,
}

impl AdditionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KnownRole => "known_role",
            Self::Exclusion => "exclusion",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "known_role" => Some(Self::KnownRole),
            "exclusion" => Some(Self::Exclusion),
            _ => None,
        }
    }
}

/// One persisted lexicon addition.
///
/// For `KnownRole`, `term` is either the canonical title itself or one of its
/// aliases and `canonical_name` names the title it resolves to. For
/// `Exclusion`, `term` and `canonical_name` are the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconAddition {
    pub kind: AdditionKind,
    pub term: String,
    pub canonical_name: String,
    pub category: Option<String>,
    pub is_deliverable: bool,
    /// Confidence weight for known-role additions.
    pub weight: f64,
}

impl LexiconAddition {
    pub fn known_role(
        term: impl Into<String>,
        canonical_name: impl Into<String>,
        category: Option<String>,
        is_deliverable: bool,
        weight: f64,
    ) -> Self {
        Self {
            kind: AdditionKind::KnownRole,
            term: term.into(),
            canonical_name: canonical_name.into(),
            category,
            is_deliverable,
            weight,
        }
    }

    pub fn exclusion(term: impl Into<String>) -> Self {
        let term = term.into();
        Self {
            kind: AdditionKind::Exclusion,
            canonical_name: term.clone(),
            term,
            category: None,
            is_deliverable: false,
            weight: 0.0,
        }
    }
}
