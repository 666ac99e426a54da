//! Extraction errors: per-document and per-paragraph failures.

use super::error_code::{self, RolecallErrorCode};

/// Errors raised while generating or validating candidates.
///
/// `MalformedInput` fails one document's scan; the paragraph-level variants
/// are collected as non-fatal errors and the paragraph yields no candidates.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractionError {
    #[error("Malformed input for document '{document_id}': {reason}")]
    MalformedInput { document_id: String, reason: String },

    #[error("Paragraph {paragraph_index} of '{document_id}' failed: {message}")]
    ParagraphFailed {
        document_id: String,
        paragraph_index: usize,
        message: String,
    },

    #[error("Annotation failed for paragraph {paragraph_index}: {message}")]
    AnnotationFailed {
        paragraph_index: usize,
        message: String,
    },

    #[error("Scan cancelled before document '{document_id}' started")]
    Cancelled { document_id: String },
}

impl ExtractionError {
    pub fn malformed(document_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            document_id: document_id.into(),
            reason: reason.into(),
        }
    }
}

impl RolecallErrorCode for ExtractionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } => error_code::MALFORMED_INPUT,
            Self::ParagraphFailed { .. } => error_code::PARAGRAPH_FAILED,
            Self::AnnotationFailed { .. } => error_code::ANNOTATION_FAILED,
            Self::Cancelled { .. } => error_code::CANCELLED,
        }
    }
}
