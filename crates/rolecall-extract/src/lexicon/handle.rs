//! Publishing point for lexicon snapshots.

use std::sync::Arc;

use rolecall_core::errors::LexiconError;
use rolecall_core::types::LexiconAddition;

use super::{LexiconDefinition, TechnicalLexicon};
use crate::snapshot::SnapshotCell;

/// Holds the base definition and the current snapshot. Scans call
/// `snapshot()` once and keep the returned `Arc` for their whole run.
#[derive(Debug)]
pub struct LexiconHandle {
    base: Arc<LexiconDefinition>,
    current: SnapshotCell<TechnicalLexicon>,
}

impl LexiconHandle {
    /// Build the first snapshot from `base` and previously persisted
    /// additions. The version is bumped once when additions are present.
    pub fn new(base: LexiconDefinition, additions: &[LexiconAddition]) -> Result<Self, LexiconError> {
        let version = if additions.is_empty() {
            base.version
        } else {
            base.version + 1
        };
        let lexicon = TechnicalLexicon::build(&base, additions, version)?;
        Ok(Self {
            base: Arc::new(base),
            current: SnapshotCell::new(lexicon),
        })
    }

    pub fn snapshot(&self) -> Arc<TechnicalLexicon> {
        self.current.load()
    }

    pub fn version(&self) -> u64 {
        self.current.load().version()
    }

    /// Rebuild from the base plus the full addition set and swap it in as
    /// version + 1. On error the current snapshot stays in place.
    pub fn publish(&self, additions: &[LexiconAddition]) -> Result<Arc<TechnicalLexicon>, LexiconError> {
        let next_version = self.version() + 1;
        let lexicon = Arc::new(TechnicalLexicon::build(&self.base, additions, next_version)?);
        self.current.store(Arc::clone(&lexicon));
        tracing::info!(lexicon_version = next_version, additions = additions.len(), "lexicon snapshot published");
        Ok(lexicon)
    }
}
