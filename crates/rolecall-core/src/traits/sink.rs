//! The automated write surface.

use crate::errors::StorageError;
use crate::types::CanonicalRole;

/// Everything an automated scan is allowed to write.
///
/// Implementations record sightings only: they create pending rows for new
/// roles and merge mention metadata into existing ones. There is no way to
/// change an adjudication status through this trait.
pub trait SightingSink: Send + Sync {
    /// Upsert one scan's canonical roles. Returns the number of rows touched.
    fn record_sightings(&self, roles: &[CanonicalRole]) -> Result<usize, StorageError>;
}
