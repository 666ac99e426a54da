//! The learner's write surface.
//!
//! `LearningLedger` reaches the `lexicon_additions` and `learned_patterns`
//! tables and nothing else. It cannot touch a role row, so the learner has no
//! path to a status change.

use rolecall_core::errors::StorageError;
use rolecall_core::types::{LearnedPattern, LexiconAddition};
use rusqlite::Connection;

use crate::adjudication::AdjudicationStore;
use crate::queries::{learned_patterns, lexicon_additions};

/// Persistent learning state: lexicon additions and learned patterns.
#[derive(Clone)]
pub struct LearningLedger {
    store: AdjudicationStore,
}

impl LearningLedger {
    pub(crate) fn new(store: AdjudicationStore) -> Self {
        Self { store }
    }

    /// Recorded additions, oldest first.
    pub fn additions(&self) -> Result<Vec<LexiconAddition>, StorageError> {
        self.store
            .database()
            .with_reader(lexicon_additions::load_additions)
    }

    pub fn patterns(&self) -> Result<Vec<LearnedPattern>, StorageError> {
        self.store
            .database()
            .with_reader(learned_patterns::load_patterns)
    }

    /// Run `f` in one immediate transaction. Failures are attributed to
    /// `subject`, usually the first role of the pass.
    pub fn record<T, F>(&self, subject: &str, f: F) -> Result<T, StorageError>
    where
        F: Fn(&LedgerTx<'_>) -> Result<T, StorageError>,
    {
        self.store
            .transact(subject, None, |tx| f(&LedgerTx { conn: tx }))
    }
}

/// Learning-table operations inside an open transaction.
pub struct LedgerTx<'a> {
    conn: &'a Connection,
}

impl LedgerTx<'_> {
    /// Record or refresh an addition. Returns true when it is new.
    pub fn add(&self, addition: &LexiconAddition, added_by: &str) -> Result<bool, StorageError> {
        lexicon_additions::upsert_addition(self.conn, addition, added_by)
    }

    /// Drop learned known-role entries for a canonical key.
    pub fn retract_known_role(&self, canonical_key: &str) -> Result<usize, StorageError> {
        lexicon_additions::delete_known_role(self.conn, canonical_key)
    }

    /// Drop a learned exclusion.
    pub fn retract_exclusion(&self, term_key: &str) -> Result<usize, StorageError> {
        lexicon_additions::delete_exclusion(self.conn, term_key)
    }

    pub fn pattern(&self, pattern_key: &str) -> Result<Option<LearnedPattern>, StorageError> {
        learned_patterns::get_pattern(self.conn, pattern_key)
    }

    pub fn save_pattern(&self, pattern: &LearnedPattern) -> Result<(), StorageError> {
        learned_patterns::upsert_pattern(self.conn, pattern)
    }
}
