//! V001 migration: adjudicated roles, per-document sightings, sample
//! contexts, and the status audit history.

pub const MIGRATION_SQL: &str = r#"
-- One row per canonical role, keyed by its normalized name.
-- aliases and function_tags are JSON arrays.
CREATE TABLE IF NOT EXISTS adjudicated_roles (
    role_key TEXT PRIMARY KEY,
    canonical_name TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    category TEXT,
    notes TEXT,
    function_tags TEXT NOT NULL DEFAULT '[]',
    aliases TEXT NOT NULL DEFAULT '[]',
    max_confidence REAL NOT NULL DEFAULT 0.0,
    is_deliverable INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL DEFAULT (unixepoch()),
    updated_at INTEGER NOT NULL DEFAULT (unixepoch()),
    updated_by TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_roles_status ON adjudicated_roles(status);
CREATE INDEX IF NOT EXISTS idx_roles_category ON adjudicated_roles(category);

-- Mention count per (role, document). Rescanning a document replaces its row.
CREATE TABLE IF NOT EXISTS role_sightings (
    role_key TEXT NOT NULL REFERENCES adjudicated_roles(role_key) ON DELETE CASCADE,
    document_id TEXT NOT NULL,
    mention_count INTEGER NOT NULL,
    last_seen_at INTEGER NOT NULL DEFAULT (unixepoch()),
    PRIMARY KEY (role_key, document_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_sightings_document ON role_sightings(document_id);

-- Distinct sample contexts in first-seen order.
CREATE TABLE IF NOT EXISTS role_contexts (
    role_key TEXT NOT NULL REFERENCES adjudicated_roles(role_key) ON DELETE CASCADE,
    seq INTEGER NOT NULL,
    context TEXT NOT NULL,
    PRIMARY KEY (role_key, seq),
    UNIQUE (role_key, context)
) STRICT;

-- Append-only log of human status changes.
CREATE TABLE IF NOT EXISTS role_status_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    role_key TEXT NOT NULL REFERENCES adjudicated_roles(role_key) ON DELETE CASCADE,
    from_status TEXT NOT NULL,
    to_status TEXT NOT NULL,
    changed_by TEXT NOT NULL,
    changed_at INTEGER NOT NULL DEFAULT (unixepoch())
) STRICT;

CREATE INDEX IF NOT EXISTS idx_status_history_role ON role_status_history(role_key, id);
"#;
