//! Base confidences and post-base adjustments.

use rolecall_core::config::ScoringConfig;
use rolecall_core::constants::{
    CONTEXTUAL_CATEGORY_CONFIDENCE, KNOWN_ROLE_CONFIDENCE, RESPONSIBILITY_MATRIX_BOOST,
    ROLE_SUFFIX_CONFIDENCE,
};
use rolecall_core::types::Confidence;

/// Scoring weights resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub contextual: f64,
    pub known_role: f64,
    pub suffix: f64,
    pub matrix_boost: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            contextual: CONTEXTUAL_CATEGORY_CONFIDENCE,
            known_role: KNOWN_ROLE_CONFIDENCE,
            suffix: ROLE_SUFFIX_CONFIDENCE,
            matrix_boost: RESPONSIBILITY_MATRIX_BOOST,
        }
    }
}

impl ScoringWeights {
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            contextual: config.effective_contextual_confidence(),
            known_role: config.effective_known_role_confidence(),
            suffix: config.effective_suffix_confidence(),
            matrix_boost: config.effective_responsibility_matrix_boost(),
        }
    }
}

/// Apply the matrix boost, then the learned delta. Both steps clamp.
pub fn finalize(base: f64, in_matrix: bool, weights: &ScoringWeights, learned_delta: f64) -> Confidence {
    let boosted = if in_matrix {
        Confidence::new(base).adjusted(weights.matrix_boost)
    } else {
        Confidence::new(base)
    };
    boosted.adjusted(learned_delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_boost_caps_at_one() {
        let c = finalize(0.90, true, &ScoringWeights::default(), 0.0);
        assert_eq!(c.value(), 1.0);
    }

    #[test]
    fn learned_delta_applies_after_boost() {
        let c = finalize(0.90, true, &ScoringWeights::default(), -0.3);
        assert!((c.value() - 0.70).abs() < 1e-9);
    }

    #[test]
    fn prose_keeps_base() {
        let c = finalize(0.88, false, &ScoringWeights::default(), 0.0);
        assert!((c.value() - 0.88).abs() < 1e-9);
    }
}
