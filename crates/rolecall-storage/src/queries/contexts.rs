//! Queries for the role_contexts table: capped, distinct sample sentences.

use rolecall_core::errors::StorageError;
use rusqlite::{params, Connection};

use crate::sqlite_err;

/// Sample contexts for a role in first-seen order.
pub fn contexts_for_role(conn: &Connection, key: &str) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT context FROM role_contexts WHERE role_key = ?1 ORDER BY seq")
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![key], |row| row.get(0))
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Append contexts not already stored until the role holds `cap` of them.
/// Returns how many were added.
pub fn append_contexts(
    conn: &Connection,
    key: &str,
    contexts: &[String],
    cap: usize,
) -> Result<usize, StorageError> {
    let mut stored: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM role_contexts WHERE role_key = ?1",
            params![key],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;

    let mut stmt = conn
        .prepare_cached(
            "INSERT OR IGNORE INTO role_contexts (role_key, seq, context) VALUES (?1, ?2, ?3)",
        )
        .map_err(sqlite_err)?;
    let mut added = 0;
    for context in contexts {
        if stored as usize >= cap {
            break;
        }
        let changed = stmt.execute(params![key, stored, context]).map_err(sqlite_err)?;
        if changed > 0 {
            stored += 1;
            added += 1;
        }
    }
    Ok(added)
}
