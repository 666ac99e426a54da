//! Top-level Rolecall configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ExtractionConfig, LearningConfig, ScoringConfig, StorageConfig};
use crate::constants::CONFIG_FILE_NAME;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`ROLECALL_*`)
/// 3. Project config (`rolecall.toml` in the project root)
/// 4. User config (`~/.rolecall/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RolecallConfig {
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
    pub learning: LearningConfig,
    pub storage: StorageConfig,
}

/// Caller-supplied overrides with the highest priority.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<String>,
    pub lexicon_path: Option<String>,
    pub sample_context_cap: Option<usize>,
    pub learning_enabled: Option<bool>,
}

impl RolecallConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
            }
        }

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RolecallConfig) -> Result<(), ConfigError> {
        let unit_fields = [
            ("extraction.max_numeric_ratio", config.extraction.max_numeric_ratio),
            ("scoring.contextual_confidence", config.scoring.contextual_confidence),
            ("scoring.known_role_confidence", config.scoring.known_role_confidence),
            ("scoring.suffix_confidence", config.scoring.suffix_confidence),
            ("scoring.responsibility_matrix_boost", config.scoring.responsibility_matrix_boost),
            ("learning.step", config.learning.step),
            ("learning.max_delta", config.learning.max_delta),
            ("learning.confirm_threshold", config.learning.confirm_threshold),
        ];
        for (field, value) in unit_fields {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be between 0.0 and 1.0".to_string(),
                    });
                }
            }
        }

        let min_len = config.extraction.effective_min_candidate_len();
        let max_len = config.extraction.effective_max_candidate_len();
        if min_len == 0 || min_len > max_len {
            return Err(ConfigError::ValidationFailed {
                field: "extraction.min_candidate_len".to_string(),
                message: format!("must be in 1..={max_len}"),
            });
        }
        if config.extraction.sample_context_cap == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "extraction.sample_context_cap".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.learning.effective_step() > config.learning.effective_max_delta() {
            return Err(ConfigError::ValidationFailed {
                field: "learning.step".to_string(),
                message: "must not exceed learning.max_delta".to_string(),
            });
        }
        if config.learning.min_observations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "learning.min_observations".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if config.storage.read_pool_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.rolecall/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".rolecall").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut RolecallConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let file_config: RolecallConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut RolecallConfig, other: &RolecallConfig) {
        // Extraction
        if other.extraction.min_candidate_len.is_some() {
            base.extraction.min_candidate_len = other.extraction.min_candidate_len;
        }
        if other.extraction.max_candidate_len.is_some() {
            base.extraction.max_candidate_len = other.extraction.max_candidate_len;
        }
        if other.extraction.max_numeric_ratio.is_some() {
            base.extraction.max_numeric_ratio = other.extraction.max_numeric_ratio;
        }
        if other.extraction.sample_context_cap.is_some() {
            base.extraction.sample_context_cap = other.extraction.sample_context_cap;
        }
        if other.extraction.lexicon_path.is_some() {
            base.extraction.lexicon_path = other.extraction.lexicon_path.clone();
        }

        // Scoring
        if other.scoring.contextual_confidence.is_some() {
            base.scoring.contextual_confidence = other.scoring.contextual_confidence;
        }
        if other.scoring.known_role_confidence.is_some() {
            base.scoring.known_role_confidence = other.scoring.known_role_confidence;
        }
        if other.scoring.suffix_confidence.is_some() {
            base.scoring.suffix_confidence = other.scoring.suffix_confidence;
        }
        if other.scoring.responsibility_matrix_boost.is_some() {
            base.scoring.responsibility_matrix_boost = other.scoring.responsibility_matrix_boost;
        }

        // Learning
        if other.learning.enabled.is_some() {
            base.learning.enabled = other.learning.enabled;
        }
        if other.learning.step.is_some() {
            base.learning.step = other.learning.step;
        }
        if other.learning.max_delta.is_some() {
            base.learning.max_delta = other.learning.max_delta;
        }
        if other.learning.min_observations.is_some() {
            base.learning.min_observations = other.learning.min_observations;
        }
        if other.learning.confirm_threshold.is_some() {
            base.learning.confirm_threshold = other.learning.confirm_threshold;
        }

        // Storage
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
        if other.storage.conflict_retries.is_some() {
            base.storage.conflict_retries = other.storage.conflict_retries;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `ROLECALL_DB_PATH`, `ROLECALL_SAMPLE_CONTEXT_CAP`, etc.
    fn apply_env_overrides(config: &mut RolecallConfig) {
        if let Ok(val) = std::env::var("ROLECALL_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("ROLECALL_LEXICON_PATH") {
            config.extraction.lexicon_path = Some(val);
        }
        if let Ok(val) = std::env::var("ROLECALL_SAMPLE_CONTEXT_CAP") {
            if let Ok(v) = val.parse::<usize>() {
                config.extraction.sample_context_cap = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ROLECALL_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ROLECALL_LEARNING_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.learning.enabled = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut RolecallConfig, overrides: &ConfigOverrides) {
        if let Some(ref v) = overrides.db_path {
            config.storage.db_path = Some(v.clone());
        }
        if let Some(ref v) = overrides.lexicon_path {
            config.extraction.lexicon_path = Some(v.clone());
        }
        if let Some(v) = overrides.sample_context_cap {
            config.extraction.sample_context_cap = Some(v);
        }
        if let Some(v) = overrides.learning_enabled {
            config.learning.enabled = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
