//! Query modules, one per table. Every function takes a borrowed
//! connection so it composes inside `with_writer`, `with_reader`, or an
//! open transaction.

pub mod contexts;
pub mod learned_patterns;
pub mod lexicon_additions;
pub mod roles;
pub mod sightings;
pub mod status_history;

use std::collections::BTreeSet;

use rusqlite::types::Type;

/// Decode a JSON string-array column.
pub(crate) fn json_set(idx: usize, raw: &str) -> rusqlite::Result<BTreeSet<String>> {
    serde_json::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Encode a string set as a JSON array column value.
pub(crate) fn to_json(set: &BTreeSet<String>) -> Result<String, rolecall_core::errors::StorageError> {
    serde_json::to_string(set).map_err(|e| rolecall_core::errors::StorageError::Serialization {
        message: e.to_string(),
    })
}
