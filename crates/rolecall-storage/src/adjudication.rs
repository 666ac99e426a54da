//! The adjudication store and its capability handles.
//!
//! `ScanWriter` is what automation gets: it can record sightings and read,
//! nothing else. `ReviewDesk` is bound to a reviewer identity and is the only
//! way to change a status or edit details. The learner gets a
//! `LearningLedger`, which never sees a role row. All share one
//! `AdjudicationStore`.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use rolecall_core::config::StorageConfig;
use rolecall_core::constants::{
    DEFAULT_CONFLICT_RETRIES, DEFAULT_READ_POOL_SIZE, DEFAULT_SAMPLE_CONTEXT_CAP, SYSTEM_ACTOR,
};
use rolecall_core::errors::StorageError;
use rolecall_core::traits::SightingSink;
use rolecall_core::types::{
    normalize_role_text, AdjudicatedRole, CanonicalRole, Confidence, RoleDetails, RoleFilter,
    RoleStatus, StatusChange,
};
use rusqlite::{Connection, Transaction};

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::learning_ledger::LearningLedger;
use crate::queries::{contexts, roles, sightings, status_history, to_json};

/// Result of one status transition, with the row as it reads after commit.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub change: StatusChange,
    pub role: AdjudicatedRole,
}

impl StatusUpdate {
    /// The status was set to the value it already had.
    pub fn is_noop(&self) -> bool {
        self.change.from_status == self.change.to_status
    }
}

struct StoreInner {
    db: DatabaseManager,
    context_cap: usize,
    conflict_retries: u32,
}

/// Shared handle to the SQLite adjudication store. Cheap to clone.
#[derive(Clone)]
pub struct AdjudicationStore {
    inner: Arc<StoreInner>,
}

impl AdjudicationStore {
    pub fn new(db: DatabaseManager, context_cap: usize, conflict_retries: u32) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                db,
                context_cap: context_cap.max(1),
                conflict_retries,
            }),
        }
    }

    /// Open from configuration. Without a `db_path` the store lives in memory.
    pub fn open(config: &StorageConfig, context_cap: usize) -> Result<Self, StorageError> {
        let db = match config.db_path.as_deref() {
            Some(path) => DatabaseManager::open(Path::new(path), config.effective_read_pool_size())?,
            None => DatabaseManager::open_in_memory()?,
        };
        Ok(Self::new(db, context_cap, config.effective_conflict_retries()))
    }

    /// Open a file-backed store with default settings.
    pub fn open_path(path: &Path) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path, DEFAULT_READ_POOL_SIZE)?;
        Ok(Self::new(db, DEFAULT_SAMPLE_CONTEXT_CAP, DEFAULT_CONFLICT_RETRIES))
    }

    /// Open an in-memory store with default settings.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseManager::open_in_memory()?;
        Ok(Self::new(db, DEFAULT_SAMPLE_CONTEXT_CAP, DEFAULT_CONFLICT_RETRIES))
    }

    /// The automated write surface.
    pub fn scan_writer(&self) -> ScanWriter {
        ScanWriter {
            store: self.clone(),
        }
    }

    /// The human write surface, bound to `reviewer`.
    pub fn review_desk(&self, reviewer: impl Into<String>) -> ReviewDesk {
        ReviewDesk {
            store: self.clone(),
            reviewer: reviewer.into(),
        }
    }

    /// The learner's write surface.
    pub fn learning_ledger(&self) -> LearningLedger {
        LearningLedger::new(self.clone())
    }

    pub(crate) fn database(&self) -> &DatabaseManager {
        &self.inner.db
    }

    /// Flush the WAL into the main database file.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.inner.db.checkpoint()
    }

    pub fn context_cap(&self) -> usize {
        self.inner.context_cap
    }

    /// Fetch one role by name, case-insensitively.
    pub fn get(&self, name: &str) -> Result<Option<AdjudicatedRole>, StorageError> {
        let key = normalize_role_text(name);
        self.inner.db.with_reader(|conn| {
            roles::get_role(conn, &key)?
                .map(|row| hydrate(conn, row))
                .transpose()
        })
    }

    /// All roles matching `filter`, ordered by name.
    pub fn list(&self, filter: &RoleFilter) -> Result<Vec<AdjudicatedRole>, StorageError> {
        self.inner.db.with_reader(|conn| {
            roles::query_roles(conn, filter)?
                .into_iter()
                .map(|row| hydrate(conn, row))
                .collect()
        })
    }

    /// Status history for one role, oldest first.
    pub fn status_history(&self, name: &str) -> Result<Vec<StatusChange>, StorageError> {
        let key = normalize_role_text(name);
        self.inner
            .db
            .with_reader(|conn| status_history::history_for_role(conn, &key))
    }

    /// Role counts per status.
    pub fn status_counts(&self) -> Result<Vec<(RoleStatus, i64)>, StorageError> {
        self.inner.db.with_reader(roles::count_by_status)
    }

    /// Run `f` in an immediate transaction on the writer, retrying write
    /// conflicts up to the configured count. Errors that are not yet tied to
    /// a role are attributed to `subject` and `requested`.
    pub(crate) fn transact<T, F>(
        &self,
        subject: &str,
        requested: Option<RoleStatus>,
        f: F,
    ) -> Result<T, StorageError>
    where
        F: Fn(&Transaction<'_>) -> Result<T, StorageError>,
    {
        let mut attempt = 0;
        loop {
            let result = self
                .inner
                .db
                .with_writer(|conn| with_immediate_transaction(conn, |tx| f(tx)));
            match result {
                Err(e) if e.is_conflict() && attempt < self.inner.conflict_retries => {
                    attempt += 1;
                    tracing::warn!(subject, attempt, error = %e, "write conflict, retrying");
                }
                other => return other.map_err(|e| attribute(e, subject, requested)),
            }
        }
    }
}

/// Tie a storage error to the role being written. Conflicts stay conflicts,
/// everything else from SQLite becomes `WriteFailed`.
fn attribute(err: StorageError, name: &str, requested: Option<RoleStatus>) -> StorageError {
    let requested_status = requested.map(|s| s.as_str().to_string());
    match err {
        StorageError::WriteConflict {
            canonical_name,
            requested_status: existing,
            message,
        } if canonical_name.is_empty() => StorageError::WriteConflict {
            canonical_name: name.to_string(),
            requested_status: existing.or(requested_status),
            message,
        },
        StorageError::SqliteError { message } | StorageError::Serialization { message } => {
            StorageError::WriteFailed {
                canonical_name: name.to_string(),
                requested_status,
                message,
            }
        }
        other => other,
    }
}

fn hydrate(conn: &Connection, row: roles::RoleRow) -> Result<AdjudicatedRole, StorageError> {
    let seen = sightings::sightings_for_role(conn, &row.key)?;
    let sample_contexts = contexts::contexts_for_role(conn, &row.key)?;
    let mention_count = seen.iter().map(|s| s.mention_count.max(0) as u64).sum();
    let document_ids = seen.into_iter().map(|s| s.document_id).collect();
    Ok(AdjudicatedRole {
        key: row.key,
        canonical_name: row.canonical_name,
        status: row.status,
        category: row.category,
        function_tags: row.function_tags,
        notes: row.notes,
        aliases: row.aliases,
        mention_count,
        document_ids,
        sample_contexts,
        max_confidence: Confidence::new(row.max_confidence),
        is_deliverable: row.is_deliverable,
        created_at: row.created_at,
        updated_at: row.updated_at,
        updated_by: row.updated_by,
    })
}

fn load_role(conn: &Connection, key: &str, name: &str) -> Result<AdjudicatedRole, StorageError> {
    match roles::get_role(conn, key)? {
        Some(row) => hydrate(conn, row),
        None => Err(StorageError::RoleNotFound {
            canonical_name: name.to_string(),
            requested_status: None,
        }),
    }
}

// ---- automated writes ----

/// Automated write surface: sightings only, plus reads.
#[derive(Clone)]
pub struct ScanWriter {
    store: AdjudicationStore,
}

impl ScanWriter {
    pub fn get(&self, name: &str) -> Result<Option<AdjudicatedRole>, StorageError> {
        self.store.get(name)
    }

    pub fn list(&self, filter: &RoleFilter) -> Result<Vec<AdjudicatedRole>, StorageError> {
        self.store.list(filter)
    }
}

impl SightingSink for ScanWriter {
    fn record_sightings(&self, found: &[CanonicalRole]) -> Result<usize, StorageError> {
        if found.is_empty() {
            return Ok(0);
        }
        let cap = self.store.context_cap();
        let subject = found[0].canonical_name.as_str();
        let _span = tracing::info_span!("rolecall.adjudication", actor = SYSTEM_ACTOR).entered();

        let created = self.store.transact(subject, None, |tx| {
            let mut created = 0usize;
            for role in found {
                let is_new = upsert_sighting(tx, role, cap)
                    .map_err(|e| attribute(e, &role.canonical_name, None))?;
                created += usize::from(is_new);
            }
            Ok(created)
        })?;

        tracing::info!(rows_written = found.len(), created, "sightings recorded");
        Ok(found.len())
    }
}

/// Create or merge one role. Returns true when the row was created.
fn upsert_sighting(conn: &Connection, role: &CanonicalRole, cap: usize) -> Result<bool, StorageError> {
    let key = if role.key.is_empty() {
        normalize_role_text(&role.canonical_name)
    } else {
        role.key.clone()
    };
    let confidence = role.confidence.value();

    let created = match roles::get_role(conn, &key)? {
        None => {
            let aliases = merged_aliases(&role.canonical_name, BTreeSet::new(), role);
            roles::insert_pending(
                conn,
                &key,
                &role.canonical_name,
                role.category.as_deref(),
                &to_json(&aliases)?,
                confidence,
                role.is_deliverable,
            )?;
            true
        }
        Some(existing) => {
            let aliases = merged_aliases(&existing.canonical_name, existing.aliases, role);
            roles::merge_sighting_fields(conn, &key, &to_json(&aliases)?, confidence, role.is_deliverable)?;
            false
        }
    };

    for (document_id, count) in &role.document_mentions {
        sightings::upsert_sighting(conn, &key, document_id, *count as i64)?;
    }
    contexts::append_contexts(conn, &key, &role.sample_contexts, cap)?;
    Ok(created)
}

/// Union stored aliases with this scan's surfaces, never listing the stored
/// name as its own alias.
fn merged_aliases(stored_name: &str, mut aliases: BTreeSet<String>, role: &CanonicalRole) -> BTreeSet<String> {
    let name_key = normalize_role_text(stored_name);
    aliases.extend(role.aliases.iter().cloned());
    aliases.insert(role.canonical_name.clone());
    aliases.retain(|a| !a.trim().is_empty() && normalize_role_text(a) != name_key);
    aliases
}

// ---- human writes ----

/// Human write surface. Every change is recorded against `reviewer`.
#[derive(Clone)]
pub struct ReviewDesk {
    store: AdjudicationStore,
    reviewer: String,
}

impl ReviewDesk {
    pub fn reviewer(&self) -> &str {
        &self.reviewer
    }

    pub fn get(&self, name: &str) -> Result<Option<AdjudicatedRole>, StorageError> {
        self.store.get(name)
    }

    /// Set one role's status. Any transition is allowed.
    pub fn set_status(&self, name: &str, status: RoleStatus) -> Result<StatusUpdate, StorageError> {
        let _span = tracing::info_span!("rolecall.adjudication", reviewer = %self.reviewer).entered();
        let update = self
            .store
            .transact(name, Some(status), |tx| apply_status(tx, name, status, &self.reviewer))?;
        tracing::info!(
            role = %update.role.canonical_name,
            from = %update.change.from_status,
            to = %update.change.to_status,
            "status set"
        );
        Ok(update)
    }

    /// Set several statuses in one transaction. Either every update commits
    /// or none does.
    pub fn batch_set_status<S: AsRef<str>>(
        &self,
        updates: &[(S, RoleStatus)],
    ) -> Result<Vec<StatusUpdate>, StorageError> {
        let Some((first_name, first_status)) = updates.first() else {
            return Ok(Vec::new());
        };
        let _span = tracing::info_span!(
            "rolecall.adjudication",
            reviewer = %self.reviewer,
            batch = updates.len()
        )
        .entered();

        let applied = self
            .store
            .transact(first_name.as_ref(), Some(*first_status), |tx| {
                updates
                    .iter()
                    .map(|(name, status)| apply_status(tx, name.as_ref(), *status, &self.reviewer))
                    .collect::<Result<Vec<_>, _>>()
            })?;
        tracing::info!(updated = applied.len(), "batch status set");
        Ok(applied)
    }

    /// Edit category, notes, and function tags. `None` fields stay as they
    /// are; an empty string clears a text field.
    pub fn update_details(&self, name: &str, details: &RoleDetails) -> Result<AdjudicatedRole, StorageError> {
        let key = normalize_role_text(name);
        let _span = tracing::info_span!("rolecall.adjudication", reviewer = %self.reviewer).entered();
        let role = self.store.transact(name, None, |tx| {
            let current = load_role(tx, &key, name)?;
            let category = match &details.category {
                Some(c) => non_empty(c),
                None => current.category.clone(),
            };
            let notes = match &details.notes {
                Some(n) => non_empty(n),
                None => current.notes.clone(),
            };
            let tags = match &details.function_tags {
                Some(tags) => tags
                    .iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
                None => current.function_tags.clone(),
            };
            roles::update_details(
                tx,
                &key,
                category.as_deref(),
                notes.as_deref(),
                &to_json(&tags)?,
                &self.reviewer,
            )?;
            load_role(tx, &key, name)
        })?;
        tracing::info!(role = %role.canonical_name, "details updated");
        Ok(role)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn apply_status(
    conn: &Connection,
    name: &str,
    status: RoleStatus,
    reviewer: &str,
) -> Result<StatusUpdate, StorageError> {
    let key = normalize_role_text(name);
    let requested_status = Some(status.as_str().to_string());
    let Some(current) = roles::get_role(conn, &key)? else {
        return Err(StorageError::RoleNotFound {
            canonical_name: name.to_string(),
            requested_status,
        });
    };

    let from = current.status;
    roles::update_status(conn, &key, status, reviewer)
        .map_err(|e| attribute(e, name, Some(status)))?;
    if from != status {
        status_history::insert_change(conn, &key, from, status, reviewer)
            .map_err(|e| attribute(e, name, Some(status)))?;
    }

    let role = load_role(conn, &key, name)?;
    let change = StatusChange {
        key,
        from_status: from,
        to_status: status,
        changed_by: reviewer.to_string(),
        changed_at: role.updated_at,
    };
    Ok(StatusUpdate { change, role })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_fills_missing_name_only() {
        let conflict = StorageError::WriteConflict {
            canonical_name: String::new(),
            requested_status: None,
            message: "busy".to_string(),
        };
        match attribute(conflict, "Safety Officer", Some(RoleStatus::Rejected)) {
            StorageError::WriteConflict {
                canonical_name,
                requested_status,
                ..
            } => {
                assert_eq!(canonical_name, "Safety Officer");
                assert_eq!(requested_status.as_deref(), Some("rejected"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let named = StorageError::WriteConflict {
            canonical_name: "Data Manager".to_string(),
            requested_status: None,
            message: "busy".to_string(),
        };
        assert_eq!(
            attribute(named, "Other", None).canonical_name(),
            Some("Data Manager")
        );
    }

    #[test]
    fn sqlite_errors_become_write_failed() {
        let err = attribute(
            StorageError::SqliteError {
                message: "disk I/O error".to_string(),
            },
            "Test Director",
            Some(RoleStatus::Confirmed),
        );
        assert!(matches!(err, StorageError::WriteFailed { .. }));
        assert_eq!(err.canonical_name(), Some("Test Director"));
    }
}
