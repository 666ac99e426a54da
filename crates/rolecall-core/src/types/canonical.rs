//! Per-scan merge output.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::confidence::Confidence;

/// One deduplicated role, merged from all surface variants seen in a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRole {
    /// Storage key. Normalized lexicon title when the lexicon recognized the
    /// role, otherwise the normalized anchor text of the cluster.
    pub key: String,
    pub canonical_name: String,
    /// Every other surface form merged into this role.
    pub aliases: BTreeSet<String>,
    pub category: Option<String>,
    pub is_deliverable: bool,
    /// Distinct mention sites across all documents.
    pub mention_count: usize,
    pub document_ids: BTreeSet<String>,
    /// Mention sites per document; sums to `mention_count`.
    pub document_mentions: BTreeMap<String, usize>,
    /// Distinct context sentences, capped.
    pub sample_contexts: Vec<String>,
    /// Max confidence over merged mentions.
    pub confidence: Confidence,
}

impl CanonicalRole {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Mentions recorded for one document.
    pub fn mentions_in(&self, document_id: &str) -> usize {
        self.document_mentions.get(document_id).copied().unwrap_or(0)
    }
}
