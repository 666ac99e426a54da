//! Tests for layered configuration resolution.

use std::sync::Mutex;

use rolecall_core::config::{ConfigOverrides, RolecallConfig};
use rolecall_core::errors::ConfigError;

/// Serializes tests that touch environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_rolecall_env_vars() {
    for key in [
        "ROLECALL_DB_PATH",
        "ROLECALL_LEXICON_PATH",
        "ROLECALL_SAMPLE_CONTEXT_CAP",
        "ROLECALL_READ_POOL_SIZE",
        "ROLECALL_LEARNING_ENABLED",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_match_documented_values() {
    let config = RolecallConfig::default();
    assert_eq!(config.extraction.effective_min_candidate_len(), 3);
    assert_eq!(config.extraction.effective_max_candidate_len(), 60);
    assert!((config.extraction.effective_max_numeric_ratio() - 0.30).abs() < 1e-9);
    assert_eq!(config.extraction.effective_sample_context_cap(), 5);
    assert!((config.scoring.effective_known_role_confidence() - 0.95).abs() < 1e-9);
    assert!((config.scoring.effective_suffix_confidence() - 0.90).abs() < 1e-9);
    assert!((config.scoring.effective_contextual_confidence() - 0.88).abs() < 1e-9);
    assert!((config.scoring.effective_responsibility_matrix_boost() - 0.20).abs() < 1e-9);
    assert!((config.learning.effective_step() - 0.05).abs() < 1e-9);
    assert!((config.learning.effective_max_delta() - 0.30).abs() < 1e-9);
    assert_eq!(config.learning.effective_min_observations(), 2);
    assert_eq!(config.storage.effective_conflict_retries(), 1);
}

#[test]
fn layered_resolution_project_env_override() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_rolecall_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("rolecall.toml"),
        r#"
[extraction]
sample_context_cap = 3
lexicon_path = "project-lexicon.toml"

[storage]
db_path = "project.db"
"#,
    )
    .unwrap();

    std::env::set_var("ROLECALL_DB_PATH", "env.db");

    let overrides = ConfigOverrides {
        sample_context_cap: Some(7),
        ..Default::default()
    };
    let config = RolecallConfig::load(dir.path(), Some(&overrides)).unwrap();
    clear_rolecall_env_vars();

    assert_eq!(config.extraction.effective_sample_context_cap(), 7);
    assert_eq!(config.storage.db_path.as_deref(), Some("env.db"));
    assert_eq!(
        config.extraction.lexicon_path.as_deref(),
        Some("project-lexicon.toml")
    );
}

#[test]
fn missing_project_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_rolecall_env_vars();
    let dir = tempfile::TempDir::new().unwrap();
    let config = RolecallConfig::load(dir.path(), None).unwrap();
    assert!(config.storage.db_path.is_none());
    assert!(config.learning.effective_enabled());
}

#[test]
fn invalid_toml_reports_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_rolecall_env_vars();
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("rolecall.toml"), "[extraction\nbroken").unwrap();
    let err = RolecallConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn rejects_out_of_range_ratio() {
    let err = RolecallConfig::from_toml("[extraction]\nmax_numeric_ratio = 1.5\n").unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "extraction.max_numeric_ratio")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_step_larger_than_bound() {
    let err = RolecallConfig::from_toml("[learning]\nstep = 0.5\nmax_delta = 0.3\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn rejects_zero_context_cap() {
    assert!(RolecallConfig::from_toml("[extraction]\nsample_context_cap = 0\n").is_err());
}

#[test]
fn config_roundtrips_through_toml() {
    let config = RolecallConfig::from_toml("[learning]\nconfirm_threshold = 0.8\n").unwrap();
    let text = config.to_toml().unwrap();
    let back = RolecallConfig::from_toml(&text).unwrap();
    assert_eq!(back.learning.confirm_threshold, Some(0.8));
}
