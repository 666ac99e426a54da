//! Queries for the role_sightings table: mention counts per (role, document).

use rolecall_core::errors::StorageError;
use rusqlite::{params, Connection};

use crate::sqlite_err;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SightingRow {
    pub document_id: String,
    pub mention_count: i64,
}

/// Record a document's mention count for a role, replacing any previous
/// count for the same document.
pub fn upsert_sighting(
    conn: &Connection,
    key: &str,
    document_id: &str,
    mention_count: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO role_sightings (role_key, document_id, mention_count)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(role_key, document_id) DO UPDATE SET
            mention_count = excluded.mention_count,
            last_seen_at = unixepoch()",
        params![key, document_id, mention_count],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

/// Sightings for one role, ordered by document id.
pub fn sightings_for_role(conn: &Connection, key: &str) -> Result<Vec<SightingRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT document_id, mention_count FROM role_sightings
             WHERE role_key = ?1 ORDER BY document_id",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![key], |row| {
            Ok(SightingRow {
                document_id: row.get(0)?,
                mention_count: row.get(1)?,
            })
        })
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}
