//! Shared constants for the Rolecall engine.

/// Rolecall version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Candidate generation ----

/// Minimum candidate length in characters.
pub const DEFAULT_MIN_CANDIDATE_LEN: usize = 3;

/// Maximum candidate length in characters.
pub const DEFAULT_MAX_CANDIDATE_LEN: usize = 60;

/// Maximum share of numeric characters before a candidate counts as noise.
pub const DEFAULT_MAX_NUMERIC_RATIO: f64 = 0.30;

/// Acronyms in "Phrase (ACRONYM)" pairs are 2 to 6 uppercase letters.
pub const ACRONYM_MIN_LEN: usize = 2;
pub const ACRONYM_MAX_LEN: usize = 6;

// ---- Scoring ----

/// Base confidence for contextual (early-validation) category matches.
pub const CONTEXTUAL_CATEGORY_CONFIDENCE: f64 = 0.88;

/// Base confidence for known-role and alias matches.
pub const KNOWN_ROLE_CONFIDENCE: f64 = 0.95;

/// Base confidence for role-suffix pattern matches.
pub const ROLE_SUFFIX_CONFIDENCE: f64 = 0.90;

/// Boost for candidates found inside a responsibility matrix table.
pub const RESPONSIBILITY_MATRIX_BOOST: f64 = 0.20;

// ---- Canonicalization ----

/// Maximum number of sample contexts kept per canonical role.
pub const DEFAULT_SAMPLE_CONTEXT_CAP: usize = 5;

// ---- Learning ----

/// Confidence delta step applied per observed disagreement.
pub const LEARNING_STEP: f64 = 0.05;

/// Absolute bound on a learned confidence delta.
pub const MAX_LEARNED_DELTA: f64 = 0.30;

/// Observations required before a learned delta affects scoring.
pub const MIN_LEARNING_OBSERVATIONS: u32 = 2;

/// Confirmations of roles scored below this count as disagreements.
pub const DEFAULT_CONFIRM_THRESHOLD: f64 = 0.90;

/// Weight recorded for lexicon entries learned from confirmations.
pub const LEARNED_ROLE_WEIGHT: f64 = 1.0;

// ---- Storage ----

/// Default read pool size for file-backed stores.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Retries for write conflicts before the error surfaces.
pub const DEFAULT_CONFLICT_RETRIES: u32 = 1;

/// Actor recorded for automated writes.
pub const SYSTEM_ACTOR: &str = "rolecall-scanner";

/// Project configuration file name.
pub const CONFIG_FILE_NAME: &str = "rolecall.toml";
