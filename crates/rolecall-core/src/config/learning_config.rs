//! Adaptive learner configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the adaptive learner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LearningConfig {
    /// Enable lexicon and pattern learning. Default: true.
    pub enabled: Option<bool>,
    /// Delta step per observation. Default: 0.05.
    pub step: Option<f64>,
    /// Absolute delta bound. Default: 0.30.
    pub max_delta: Option<f64>,
    /// Observations before a delta applies. Default: 2.
    pub min_observations: Option<u32>,
    /// Confirmations below this automatic confidence are disagreements. Default: 0.90.
    pub confirm_threshold: Option<f64>,
}

impl LearningConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_step(&self) -> f64 {
        self.step.unwrap_or(constants::LEARNING_STEP)
    }

    pub fn effective_max_delta(&self) -> f64 {
        self.max_delta.unwrap_or(constants::MAX_LEARNED_DELTA)
    }

    pub fn effective_min_observations(&self) -> u32 {
        self.min_observations
            .unwrap_or(constants::MIN_LEARNING_OBSERVATIONS)
    }

    pub fn effective_confirm_threshold(&self) -> f64 {
        self.confirm_threshold
            .unwrap_or(constants::DEFAULT_CONFIRM_THRESHOLD)
    }
}
