//! Read-only connections for file-backed stores, handed out round-robin.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rolecall_core::errors::StorageError;
use rusqlite::{Connection, OpenFlags};

use super::pragmas::configure_reader;
use crate::sqlite_err;

/// Upper bound on pooled readers; more buys nothing behind one writer.
pub const MAX_READERS: usize = 8;

pub struct ReadPool {
    readers: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open between 1 and `MAX_READERS` readers on `path`.
    pub fn open(path: &Path, requested: usize) -> Result<Self, StorageError> {
        let readers = (0..requested.clamp(1, MAX_READERS))
            .map(|_| open_reader(path).map(Mutex::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            readers,
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    /// Run `f` on the next reader in turn.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let turn = self.cursor.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[turn]
            .lock()
            .map_err(|_| StorageError::SqliteError {
                message: format!("reader {turn} poisoned"),
            })?;
        f(&conn)
    }
}

fn open_reader(path: &Path) -> Result<Connection, StorageError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(sqlite_err)?;
    configure_reader(&conn)?;
    Ok(conn)
}
