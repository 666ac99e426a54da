//! Queries for the lexicon_additions table.

use rolecall_core::errors::StorageError;
use rolecall_core::types::{normalize_role_text, AdditionKind, LexiconAddition};
use rusqlite::types::Type;
use rusqlite::{params, Connection};

use crate::sqlite_err;

/// Insert an addition, or refresh it when the same (kind, term, title)
/// already exists. Returns true when a new row was created.
pub fn upsert_addition(
    conn: &Connection,
    addition: &LexiconAddition,
    added_by: &str,
) -> Result<bool, StorageError> {
    let term_key = normalize_role_text(&addition.term);
    let canonical_key = normalize_role_text(&addition.canonical_name);
    let existed: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM lexicon_additions
              WHERE kind = ?1 AND term_key = ?2 AND canonical_key = ?3)",
            params![addition.kind.as_str(), term_key, canonical_key],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;

    conn.execute(
        "INSERT INTO lexicon_additions
            (kind, term_key, canonical_key, term, canonical_name, category,
             is_deliverable, weight, added_by)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(kind, term_key, canonical_key) DO UPDATE SET
            category = coalesce(excluded.category, category),
            is_deliverable = excluded.is_deliverable,
            weight = excluded.weight",
        params![
            addition.kind.as_str(),
            term_key,
            canonical_key,
            addition.term.trim(),
            addition.canonical_name.trim(),
            addition.category,
            addition.is_deliverable as i64,
            addition.weight,
            added_by,
        ],
    )
    .map_err(sqlite_err)?;
    Ok(!existed)
}

/// Remove every known-role addition resolving to `canonical_key`.
pub fn delete_known_role(conn: &Connection, canonical_key: &str) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM lexicon_additions WHERE kind = 'known_role' AND canonical_key = ?1",
        params![canonical_key],
    )
    .map_err(sqlite_err)
}

/// Remove an exclusion addition.
pub fn delete_exclusion(conn: &Connection, term_key: &str) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM lexicon_additions WHERE kind = 'exclusion' AND term_key = ?1",
        params![term_key],
    )
    .map_err(sqlite_err)
}

/// All additions in the order they were first recorded.
pub fn load_additions(conn: &Connection) -> Result<Vec<LexiconAddition>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT kind, term, canonical_name, category, is_deliverable, weight
             FROM lexicon_additions ORDER BY rowid",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map([], |row| {
            let raw: String = row.get(0)?;
            let kind = AdditionKind::parse_str(&raw).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    Type::Text,
                    format!("unknown addition kind '{raw}'").into(),
                )
            })?;
            Ok(LexiconAddition {
                kind,
                term: row.get(1)?,
                canonical_name: row.get(2)?,
                category: row.get(3)?,
                is_deliverable: row.get::<_, i64>(4)? != 0,
                weight: row.get(5)?,
            })
        })
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}
