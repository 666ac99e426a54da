//! Structured span field names used across Rolecall subsystems.
//!
//! Consistent names keep log queries and dashboards stable.

/// Span: one document scan.
pub const SCAN_SPAN: &str = "rolecall.scan";

/// Span: one adjudication call (set-status, batch, details).
pub const ADJUDICATION_SPAN: &str = "rolecall.adjudication";

/// Span: one learner pass after a status change.
pub const LEARNING_SPAN: &str = "rolecall.learning";

/// Scan: raw candidates produced before validation.
pub const RAW_CANDIDATES: &str = "raw_candidates";

/// Scan: candidates that passed validation.
pub const VALID_CANDIDATES: &str = "valid_candidates";

/// Scan: canonical roles produced.
pub const CANONICAL_ROLES: &str = "canonical_roles";

/// Scan: paragraphs that failed and were skipped.
pub const FAILED_PARAGRAPHS: &str = "failed_paragraphs";

/// Scan: wall time in milliseconds.
pub const SCAN_DURATION_MS: &str = "scan_duration_ms";

/// Storage: rows written by one upsert batch.
pub const ROWS_WRITTEN: &str = "rows_written";

/// Lexicon: snapshot version in use.
pub const LEXICON_VERSION: &str = "lexicon_version";
