//! Storage errors for the adjudication store.

use super::error_code::{self, RolecallErrorCode};

/// Errors from SQLite persistence.
///
/// Write failures always carry the target canonical name and the requested
/// status (when one was requested) so the caller can retry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Write conflict on role '{canonical_name}' (requested status: {}): {message}", .requested_status.as_deref().unwrap_or("none"))]
    WriteConflict {
        canonical_name: String,
        requested_status: Option<String>,
        message: String,
    },

    #[error("Write failed for role '{canonical_name}' (requested status: {}): {message}", .requested_status.as_deref().unwrap_or("none"))]
    WriteFailed {
        canonical_name: String,
        requested_status: Option<String>,
        message: String,
    },

    #[error("Role not found: '{canonical_name}' (requested status: {})", .requested_status.as_deref().unwrap_or("none"))]
    RoleNotFound {
        canonical_name: String,
        requested_status: Option<String>,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl StorageError {
    /// Whether this error is a transient write conflict worth retrying.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::WriteConflict { .. })
    }

    /// The canonical name this error is about, when known.
    pub fn canonical_name(&self) -> Option<&str> {
        match self {
            Self::WriteConflict { canonical_name, .. }
            | Self::WriteFailed { canonical_name, .. }
            | Self::RoleNotFound { canonical_name, .. } => Some(canonical_name),
            _ => None,
        }
    }
}

impl RolecallErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } | Self::Serialization { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::WriteConflict { .. } => error_code::STORE_WRITE_CONFLICT,
            Self::WriteFailed { .. } => error_code::STORE_WRITE_FAILED,
            Self::RoleNotFound { .. } => error_code::ROLE_NOT_FOUND,
        }
    }
}
