//! # rolecall-learning
//!
//! Human decision → lexicon additions (known roles, exclusions) and
//! disagreement observations → bounded, frequency-gated confidence deltas.
//! Every committed status change feeds the learner; results are persisted in
//! the adjudication store and published as fresh snapshots.

pub mod engine;
pub mod feedback;
pub mod lexicon_updates;
pub mod settings;

pub use engine::{AdaptiveLearner, LearningOutcome};
pub use feedback::classify_disagreement;
pub use lexicon_updates::{lexicon_change, LexiconChange};
pub use settings::LearnerSettings;
