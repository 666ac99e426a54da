//! Adaptive learner errors.

use super::error_code::{self, RolecallErrorCode};
use super::{LexiconError, StorageError};

/// Errors raised while applying human decisions to the lexicon and
/// learned-pattern tables.
#[derive(Debug, thiserror::Error)]
pub enum LearningError {
    #[error("Learning storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Learning produced an invalid lexicon: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("Snapshot lock poisoned: {0}")]
    Poisoned(&'static str),
}

impl RolecallErrorCode for LearningError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::Lexicon(e) => e.error_code(),
            Self::Poisoned(_) => error_code::LEARNING_ERROR,
        }
    }
}
