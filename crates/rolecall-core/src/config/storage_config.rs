//! Adjudication store configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the SQLite adjudication store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. `None` opens an in-memory store.
    pub db_path: Option<String>,
    /// Read pool size for file-backed stores. Default: 4.
    pub read_pool_size: Option<usize>,
    /// Retries on write conflicts. Default: 1.
    pub conflict_retries: Option<u32>,
}

impl StorageConfig {
    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size
            .unwrap_or(constants::DEFAULT_READ_POOL_SIZE)
    }

    pub fn effective_conflict_retries(&self) -> u32 {
        self.conflict_retries
            .unwrap_or(constants::DEFAULT_CONFLICT_RETRIES)
    }
}
