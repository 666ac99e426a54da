//! rolecall-core: shared foundation for the Rolecall engine.
//!
//! Types, traits, errors, configuration, tracing setup and constants.
//! Every other crate in the workspace depends on this one.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::RolecallConfig;
pub use errors::{EngineError, ExtractionError, LexiconError, PipelineResult, StorageError};
pub use types::{
    AdjudicatedRole, CanonicalRole, CandidateOrigin, Confidence, DocumentInput, LearnedPattern,
    LearnedPatternTable, Paragraph, ReasonCode, RoleCandidate, RoleCandidateVerdict, RoleFilter,
    RoleStatus, Span,
};
