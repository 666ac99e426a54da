//! Validator scoring configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Base confidences and boosts used by the validator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Default: 0.88.
    pub contextual_confidence: Option<f64>,
    /// Default: 0.95.
    pub known_role_confidence: Option<f64>,
    /// Default: 0.90.
    pub suffix_confidence: Option<f64>,
    /// Boost inside responsibility matrix tables. Default: 0.20.
    pub responsibility_matrix_boost: Option<f64>,
}

impl ScoringConfig {
    pub fn effective_contextual_confidence(&self) -> f64 {
        self.contextual_confidence
            .unwrap_or(constants::CONTEXTUAL_CATEGORY_CONFIDENCE)
    }

    pub fn effective_known_role_confidence(&self) -> f64 {
        self.known_role_confidence
            .unwrap_or(constants::KNOWN_ROLE_CONFIDENCE)
    }

    pub fn effective_suffix_confidence(&self) -> f64 {
        self.suffix_confidence
            .unwrap_or(constants::ROLE_SUFFIX_CONFIDENCE)
    }

    pub fn effective_responsibility_matrix_boost(&self) -> f64 {
        self.responsibility_matrix_boost
            .unwrap_or(constants::RESPONSIBILITY_MATRIX_BOOST)
    }
}
