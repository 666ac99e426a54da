//! Lexicon errors. Any of these at startup is fatal.

use super::error_code::{self, RolecallErrorCode};

/// Errors that can occur while loading or validating the technical lexicon.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("Failed to read lexicon {path}: {message}")]
    Io { path: String, message: String },

    #[error("Lexicon parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Lexicon is corrupt: {reason}")]
    Corrupt { reason: String },

    #[error("Lexicon pattern failed to compile: {0}")]
    InvalidPattern(String),
}

impl LexiconError {
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::Corrupt {
            reason: reason.into(),
        }
    }
}

impl RolecallErrorCode for LexiconError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } | Self::Parse { .. } => error_code::LEXICON_LOAD_FAILED,
            Self::Corrupt { .. } | Self::InvalidPattern(_) => error_code::LEXICON_CORRUPT,
        }
    }
}
