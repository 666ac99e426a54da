//! Atomically swappable shared snapshots.

use std::sync::{Arc, RwLock};

/// An `Arc<T>` behind a lock. Readers clone the `Arc` and drop the lock at
/// once, so a swap never waits for a scan to finish.
#[derive(Debug)]
pub struct SnapshotCell<T> {
    inner: RwLock<Arc<T>>,
}

impl<T> SnapshotCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(Arc::new(value)),
        }
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<T> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the snapshot. Holders of the old `Arc` keep it.
    pub fn store(&self, value: Arc<T>) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = value;
    }
}

impl<T: Default> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
