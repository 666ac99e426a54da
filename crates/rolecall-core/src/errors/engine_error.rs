//! Top-level engine error aggregating subsystem errors.

use super::error_code::RolecallErrorCode;
use super::{ConfigError, ExtractionError, LearningError, LexiconError, StorageError};

/// Errors surfaced by the engine facade.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Learning error: {0}")]
    Learning(#[from] LearningError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RolecallErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Extraction(e) => e.error_code(),
            Self::Lexicon(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Learning(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
