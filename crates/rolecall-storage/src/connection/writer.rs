//! Write transactions.

use rolecall_core::errors::StorageError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::sqlite_err;

/// Run `f` inside a `BEGIN IMMEDIATE` transaction. The write lock is taken
/// up front, so a busy database fails at begin rather than mid-way. The
/// transaction rolls back when `f` returns an error.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(sqlite_err)?;
    let result = f(&tx)?;
    tx.commit().map_err(sqlite_err)?;
    Ok(result)
}
