//! Queries for the learned_patterns table.

use rolecall_core::errors::StorageError;
use rolecall_core::types::LearnedPattern;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::sqlite_err;

fn map_row(row: &Row<'_>) -> rusqlite::Result<LearnedPattern> {
    Ok(LearnedPattern {
        pattern_key: row.get(0)?,
        confidence_delta: row.get(1)?,
        observation_count: row.get(2)?,
    })
}

/// Insert or replace a pattern's delta and count.
pub fn upsert_pattern(conn: &Connection, pattern: &LearnedPattern) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO learned_patterns (pattern_key, confidence_delta, observation_count)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(pattern_key) DO UPDATE SET
            confidence_delta = excluded.confidence_delta,
            observation_count = excluded.observation_count,
            updated_at = unixepoch()",
        params![pattern.pattern_key, pattern.confidence_delta, pattern.observation_count],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

pub fn get_pattern(conn: &Connection, pattern_key: &str) -> Result<Option<LearnedPattern>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT pattern_key, confidence_delta, observation_count
             FROM learned_patterns WHERE pattern_key = ?1",
        )
        .map_err(sqlite_err)?;
    stmt.query_row(params![pattern_key], map_row)
        .optional()
        .map_err(sqlite_err)
}

/// All patterns, ordered by key.
pub fn load_patterns(conn: &Connection) -> Result<Vec<LearnedPattern>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT pattern_key, confidence_delta, observation_count
             FROM learned_patterns ORDER BY pattern_key",
        )
        .map_err(sqlite_err)?;
    let rows = stmt.query_map([], map_row).map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}
