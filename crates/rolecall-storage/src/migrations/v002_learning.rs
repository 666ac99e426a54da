//! V002 migration: learned confidence deltas and lexicon additions.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS learned_patterns (
    pattern_key TEXT PRIMARY KEY,
    confidence_delta REAL NOT NULL DEFAULT 0.0,
    observation_count INTEGER NOT NULL DEFAULT 0,
    updated_at INTEGER NOT NULL DEFAULT (unixepoch())
) STRICT;

-- Terms learned from adjudication, merged over the base lexicon at load.
-- An acronym may resolve to several titles, so the title is part of the key.
CREATE TABLE IF NOT EXISTS lexicon_additions (
    kind TEXT NOT NULL,
    term_key TEXT NOT NULL,
    canonical_key TEXT NOT NULL,
    term TEXT NOT NULL,
    canonical_name TEXT NOT NULL,
    category TEXT,
    is_deliverable INTEGER NOT NULL DEFAULT 0,
    weight REAL NOT NULL DEFAULT 1.0,
    added_by TEXT NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch()),
    PRIMARY KEY (kind, term_key, canonical_key)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_additions_canonical ON lexicon_additions(canonical_key);
"#;
