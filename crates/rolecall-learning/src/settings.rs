//! Learner tuning resolved from configuration.

use rolecall_core::config::LearningConfig;
use rolecall_core::constants::LEARNED_ROLE_WEIGHT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearnerSettings {
    pub enabled: bool,
    pub step: f64,
    pub max_delta: f64,
    pub min_observations: u32,
    /// Acceptances of roles scored below this are disagreements.
    pub confirm_threshold: f64,
    /// Weight given to learned known-role entries.
    pub learned_weight: f64,
}

impl Default for LearnerSettings {
    fn default() -> Self {
        Self::from_config(&LearningConfig::default())
    }
}

impl LearnerSettings {
    pub fn from_config(config: &LearningConfig) -> Self {
        Self {
            enabled: config.effective_enabled(),
            step: config.effective_step(),
            max_delta: config.effective_max_delta(),
            min_observations: config.effective_min_observations(),
            confirm_threshold: config.effective_confirm_threshold(),
            learned_weight: LEARNED_ROLE_WEIGHT,
        }
    }
}
