//! rolecall-storage: SQLite persistence for adjudicated roles.
//!
//! One serialized writer plus a round-robin read pool, `PRAGMA user_version`
//! migrations, free-function query modules, and the capability handles
//! (`ScanWriter`, `ReviewDesk`, `LearningLedger`) that separate automated
//! from human writes.

pub mod adjudication;
pub mod connection;
pub mod learning_ledger;
pub mod migrations;
pub(crate) mod queries;

pub use adjudication::{AdjudicationStore, ReviewDesk, ScanWriter, StatusUpdate};
pub use learning_ledger::{LearningLedger, LedgerTx};
pub use connection::DatabaseManager;

use rolecall_core::errors::StorageError;

/// Map a rusqlite error, keeping busy/locked failures distinguishable so the
/// store can retry them.
pub(crate) fn sqlite_err(e: rusqlite::Error) -> StorageError {
    if is_busy(&e) {
        StorageError::WriteConflict {
            canonical_name: String::new(),
            requested_status: None,
            message: e.to_string(),
        }
    } else {
        StorageError::SqliteError {
            message: e.to_string(),
        }
    }
}

fn is_busy(e: &rusqlite::Error) -> bool {
    matches!(
        e.sqlite_error_code(),
        Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
    )
}
