//! Configuration system for Rolecall.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod extraction_config;
pub mod learning_config;
pub mod rolecall_config;
pub mod scoring_config;
pub mod storage_config;

pub use extraction_config::ExtractionConfig;
pub use learning_config::LearningConfig;
pub use rolecall_config::{ConfigOverrides, RolecallConfig};
pub use scoring_config::ScoringConfig;
pub use storage_config::StorageConfig;
