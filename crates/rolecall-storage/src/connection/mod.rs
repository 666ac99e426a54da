//! Connection management: write-serialized + read-pooled.

pub mod pool;
pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rolecall_core::errors::StorageError;
use rusqlite::Connection;

use self::pool::ReadPool;
use self::pragmas::configure_writer;
use crate::{migrations, sqlite_err};

/// Owns the single write connection and, for file-backed databases, the
/// read pool.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    /// `None` for in-memory databases: a second in-memory connection would
    /// be a different database, so reads go through the writer.
    readers: Option<ReadPool>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database file, apply pragmas and run migrations.
    pub fn open(path: &Path, read_pool_size: usize) -> Result<Self, StorageError> {
        let writer = Connection::open(path).map_err(sqlite_err)?;
        configure_writer(&writer, true)?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open(path, read_pool_size)?;
        tracing::debug!(path = %path.display(), readers = readers.reader_count(), "database opened");

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Some(readers),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(sqlite_err)?;
        configure_writer(&writer, false)?;
        migrations::run_migrations(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: None,
            path: None,
        })
    }

    /// Execute a write operation with the serialized writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "write lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Execute a read operation on a pooled connection, or on the writer
    /// for in-memory databases.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        match &self.readers {
            Some(pool) => pool.with_conn(f),
            None => self.with_writer(f),
        }
    }

    /// Run a WAL checkpoint (TRUNCATE mode).
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(sqlite_err)
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::pragmas::journal_mode;

    #[test]
    fn in_memory_reads_see_writer_changes() {
        let db = DatabaseManager::open_in_memory().unwrap();
        db.with_writer(|conn| {
            conn.execute(
                "INSERT INTO adjudicated_roles (role_key, canonical_name) VALUES ('pm', 'PM')",
                [],
            )
            .map_err(crate::sqlite_err)?;
            Ok(())
        })
        .unwrap();
        let n: i64 = db
            .with_reader(|conn| {
                conn.query_row("SELECT COUNT(*) FROM adjudicated_roles", [], |r| r.get(0))
                    .map_err(crate::sqlite_err)
            })
            .unwrap();
        assert_eq!(n, 1);
        assert!(db.path().is_none());
    }

    #[test]
    fn file_database_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let db = DatabaseManager::open(&dir.path().join("wal.db"), 2).unwrap();
        assert_eq!(db.with_writer(journal_mode).unwrap(), "wal");
        db.checkpoint().unwrap();
    }
}
