//! Queries for role_status_history, the append-only log of human decisions.

use rolecall_core::errors::StorageError;
use rolecall_core::types::{RoleStatus, StatusChange};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::sqlite_err;

/// Append one status change. Returns the row id.
pub fn insert_change(
    conn: &Connection,
    key: &str,
    from: RoleStatus,
    to: RoleStatus,
    changed_by: &str,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO role_status_history (role_key, from_status, to_status, changed_by)
         VALUES (?1, ?2, ?3, ?4)",
        params![key, from.as_str(), to.as_str(), changed_by],
    )
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

fn status_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<RoleStatus> {
    let raw: String = row.get(idx)?;
    RoleStatus::parse_str(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown role status '{raw}'").into(),
        )
    })
}

/// History for one role, oldest first.
pub fn history_for_role(conn: &Connection, key: &str) -> Result<Vec<StatusChange>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT role_key, from_status, to_status, changed_by, changed_at
             FROM role_status_history WHERE role_key = ?1 ORDER BY id",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![key], |row| {
            Ok(StatusChange {
                key: row.get(0)?,
                from_status: status_at(row, 1)?,
                to_status: status_at(row, 2)?,
                changed_by: row.get(3)?,
                changed_at: row.get(4)?,
            })
        })
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}
