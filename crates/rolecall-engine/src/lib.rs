//! # rolecall-engine
//!
//! The public facade. `RoleEngine` wires the lexicon snapshot, the scan
//! pipeline, the adjudication store and the adaptive learner together.
//! Automated scans write through a `ScanWriter`; humans act through a
//! `ReviewSession`, which feeds every committed decision to the learner.

pub mod engine;
pub mod report;
pub mod review;

pub use engine::RoleEngine;
pub use report::{DocumentOutcome, ScanReport};
pub use review::{ReviewOutcome, ReviewSession};

pub use rolecall_core::errors::EngineError;
pub use rolecall_core::types::{
    AdjudicatedRole, CanonicalRole, DocumentInput, Paragraph, RoleDetails, RoleFilter, RoleStatus,
};
