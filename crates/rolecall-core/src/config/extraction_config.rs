//! Candidate generation and canonicalization configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the candidate generator and canonicalizer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum candidate length in characters. Default: 3.
    pub min_candidate_len: Option<usize>,
    /// Maximum candidate length in characters. Default: 60.
    pub max_candidate_len: Option<usize>,
    /// Maximum share of digits in a candidate. Default: 0.30.
    pub max_numeric_ratio: Option<f64>,
    /// Sample contexts kept per canonical role. Default: 5.
    pub sample_context_cap: Option<usize>,
    /// Path to a lexicon TOML file. Default: the built-in lexicon.
    pub lexicon_path: Option<String>,
}

impl ExtractionConfig {
    pub fn effective_min_candidate_len(&self) -> usize {
        self.min_candidate_len
            .unwrap_or(constants::DEFAULT_MIN_CANDIDATE_LEN)
    }

    pub fn effective_max_candidate_len(&self) -> usize {
        self.max_candidate_len
            .unwrap_or(constants::DEFAULT_MAX_CANDIDATE_LEN)
    }

    pub fn effective_max_numeric_ratio(&self) -> f64 {
        self.max_numeric_ratio
            .unwrap_or(constants::DEFAULT_MAX_NUMERIC_RATIO)
    }

    pub fn effective_sample_context_cap(&self) -> usize {
        self.sample_context_cap
            .unwrap_or(constants::DEFAULT_SAMPLE_CONTEXT_CAP)
    }
}
