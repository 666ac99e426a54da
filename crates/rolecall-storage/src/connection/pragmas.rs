//! Connection setup for the adjudication database.
//!
//! The writer runs in WAL mode (file-backed only) with foreign keys on, so
//! sightings and contexts cascade with their role. Readers are query-only.
//! Both wait on a locked database before reporting a write conflict.

use std::time::Duration;

use rolecall_core::errors::StorageError;
use rusqlite::Connection;

use crate::sqlite_err;

/// How long a connection waits on a lock before SQLITE_BUSY surfaces.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Configure the single writer. WAL is skipped for in-memory databases,
/// which only support the `memory` journal.
pub fn configure_writer(conn: &Connection, file_backed: bool) -> Result<(), StorageError> {
    conn.busy_timeout(BUSY_TIMEOUT).map_err(sqlite_err)?;
    if file_backed {
        let mode: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .map_err(sqlite_err)?;
        if !mode.eq_ignore_ascii_case("wal") {
            tracing::warn!(mode = %mode, "WAL not available, writes will block readers");
        }
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(sqlite_err)?;
    }
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(sqlite_err)
}

/// Configure a pooled reader.
pub fn configure_reader(conn: &Connection) -> Result<(), StorageError> {
    conn.busy_timeout(BUSY_TIMEOUT).map_err(sqlite_err)?;
    conn.pragma_update(None, "query_only", true)
        .map_err(sqlite_err)
}

/// Current journal mode, lowercased.
pub fn journal_mode(conn: &Connection) -> Result<String, StorageError> {
    conn.pragma_query_value(None, "journal_mode", |row| row.get::<_, String>(0))
        .map(|mode| mode.to_lowercase())
        .map_err(sqlite_err)
}
