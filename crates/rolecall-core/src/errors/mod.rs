//! Error handling for Rolecall.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod extraction_error;
pub mod learning_error;
pub mod lexicon_error;
pub mod pipeline_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::RolecallErrorCode;
pub use extraction_error::ExtractionError;
pub use learning_error::LearningError;
pub use lexicon_error::LexiconError;
pub use pipeline_error::PipelineResult;
pub use storage_error::StorageError;
