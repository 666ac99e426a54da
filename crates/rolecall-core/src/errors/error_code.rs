//! RolecallErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// that callers can match on without parsing messages.
pub trait RolecallErrorCode {
    /// Returns the error code string (e.g., "LEXICON_CORRUPT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MALFORMED_INPUT: &str = "MALFORMED_INPUT";
pub const PARAGRAPH_FAILED: &str = "PARAGRAPH_FAILED";
pub const ANNOTATION_FAILED: &str = "ANNOTATION_FAILED";
pub const CANCELLED: &str = "CANCELLED";
pub const LEXICON_LOAD_FAILED: &str = "LEXICON_LOAD_FAILED";
pub const LEXICON_CORRUPT: &str = "LEXICON_CORRUPT";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const STORE_WRITE_CONFLICT: &str = "STORE_WRITE_CONFLICT";
pub const STORE_WRITE_FAILED: &str = "STORE_WRITE_FAILED";
pub const ROLE_NOT_FOUND: &str = "ROLE_NOT_FOUND";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const LEARNING_ERROR: &str = "LEARNING_ERROR";
