//! Queries for the adjudicated_roles table.

use std::collections::BTreeSet;

use rolecall_core::errors::StorageError;
use rolecall_core::types::{RoleFilter, RoleStatus};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use super::json_set;
use crate::sqlite_err;

const ROLE_COLUMNS: &str = "role_key, canonical_name, status, category, notes, function_tags,
     aliases, max_confidence, is_deliverable, created_at, updated_at, updated_by";

/// One adjudicated_roles row. Sightings and contexts live in their own tables.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRow {
    pub key: String,
    pub canonical_name: String,
    pub status: RoleStatus,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub function_tags: BTreeSet<String>,
    pub aliases: BTreeSet<String>,
    pub max_confidence: f64,
    pub is_deliverable: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub updated_by: Option<String>,
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<RoleRow> {
    let status_raw: String = row.get(2)?;
    let status = RoleStatus::parse_str(&status_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("unknown role status '{status_raw}'").into(),
        )
    })?;
    let tags: String = row.get(5)?;
    let aliases: String = row.get(6)?;
    Ok(RoleRow {
        key: row.get(0)?,
        canonical_name: row.get(1)?,
        status,
        category: row.get(3)?,
        notes: row.get(4)?,
        function_tags: json_set(5, &tags)?,
        aliases: json_set(6, &aliases)?,
        max_confidence: row.get(7)?,
        is_deliverable: row.get::<_, i64>(8)? != 0,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
        updated_by: row.get(11)?,
    })
}

/// Fetch one role by key.
pub fn get_role(conn: &Connection, key: &str) -> Result<Option<RoleRow>, StorageError> {
    let sql = format!("SELECT {ROLE_COLUMNS} FROM adjudicated_roles WHERE role_key = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    stmt.query_row(params![key], map_row)
        .optional()
        .map_err(sqlite_err)
}

/// Insert a new pending role. Status is always `pending` on creation.
pub fn insert_pending(
    conn: &Connection,
    key: &str,
    canonical_name: &str,
    category: Option<&str>,
    aliases_json: &str,
    max_confidence: f64,
    is_deliverable: bool,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO adjudicated_roles
            (role_key, canonical_name, status, category, aliases, max_confidence, is_deliverable)
         VALUES (?1, ?2, 'pending', ?3, ?4, ?5, ?6)",
        params![key, canonical_name, category, aliases_json, max_confidence, is_deliverable as i64],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

/// Merge scan metadata into an existing role. Status, category, notes and
/// tags are not touched; confidence only ever rises.
pub fn merge_sighting_fields(
    conn: &Connection,
    key: &str,
    aliases_json: &str,
    max_confidence: f64,
    is_deliverable: bool,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE adjudicated_roles SET
            aliases = ?2,
            max_confidence = max(max_confidence, ?3),
            is_deliverable = max(is_deliverable, ?4),
            updated_at = unixepoch()
         WHERE role_key = ?1",
        params![key, aliases_json, max_confidence, is_deliverable as i64],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

/// Set the status of one role. Returns the number of rows changed.
pub fn update_status(
    conn: &Connection,
    key: &str,
    status: RoleStatus,
    updated_by: &str,
) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE adjudicated_roles SET status = ?2, updated_by = ?3, updated_at = unixepoch()
         WHERE role_key = ?1",
        params![key, status.as_str(), updated_by],
    )
    .map_err(sqlite_err)
}

/// Overwrite the human-editable detail columns.
pub fn update_details(
    conn: &Connection,
    key: &str,
    category: Option<&str>,
    notes: Option<&str>,
    tags_json: &str,
    updated_by: &str,
) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE adjudicated_roles SET
            category = ?2, notes = ?3, function_tags = ?4,
            updated_by = ?5, updated_at = unixepoch()
         WHERE role_key = ?1",
        params![key, category, notes, tags_json, updated_by],
    )
    .map_err(sqlite_err)
}

/// Query roles matching `filter`, ordered by name.
///
/// Status, notes and tags are filtered in SQL. Category and free text are
/// compared after Unicode case folding in Rust, since SQLite's `lower()`
/// only folds ASCII.
pub fn query_roles(conn: &Connection, filter: &RoleFilter) -> Result<Vec<RoleRow>, StorageError> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(status) = filter.status {
        values.push(Value::Text(status.as_str().to_string()));
        clauses.push("status = ?1");
    }
    match filter.has_notes {
        Some(true) => clauses.push("coalesce(trim(notes), '') <> ''"),
        Some(false) => clauses.push("coalesce(trim(notes), '') = ''"),
        None => {}
    }
    match filter.has_tags {
        Some(true) => clauses.push("function_tags <> '[]'"),
        Some(false) => clauses.push("function_tags = '[]'"),
        None => {}
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    let sql = format!(
        "SELECT {ROLE_COLUMNS} FROM adjudicated_roles{where_sql}
         ORDER BY canonical_name COLLATE NOCASE, role_key"
    );

    let mut stmt = conn.prepare(&sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params_from_iter(values), map_row)
        .map_err(sqlite_err)?;
    let mut found = rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)?;

    let category = folded(filter.category.as_deref());
    let text = folded(filter.text.as_deref());
    if category.is_some() || text.is_some() {
        found.retain(|row| {
            category.as_deref().map_or(true, |c| {
                row.category.as_deref().is_some_and(|rc| rc.trim().to_lowercase() == c)
            }) && text.as_deref().map_or(true, |t| mentions_text(row, t))
        });
    }
    Ok(found)
}

/// Trimmed, lowercased filter value; blank means no filter.
fn folded(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

/// Whether the name, an alias, or the notes contain `needle` (already folded).
fn mentions_text(row: &RoleRow, needle: &str) -> bool {
    std::iter::once(row.canonical_name.as_str())
        .chain(row.aliases.iter().map(String::as_str))
        .chain(row.notes.as_deref())
        .any(|field| field.to_lowercase().contains(needle))
}

/// Count roles per status.
pub fn count_by_status(conn: &Connection) -> Result<Vec<(RoleStatus, i64)>, StorageError> {
    let mut out = Vec::with_capacity(RoleStatus::ALL.len());
    for status in RoleStatus::ALL {
        let n: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM adjudicated_roles WHERE status = ?1",
                params![status.as_str()],
                |row| row.get(0),
            )
            .map_err(sqlite_err)?;
        out.push((status, n));
    }
    Ok(out)
}
