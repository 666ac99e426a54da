//! rolecall-extract: the extraction side of Rolecall.
//!
//! Lexicon snapshots, candidate generation (pattern and NLP-ensemble
//! strategies), the ordered validator, the canonicalizer, and the
//! per-document scan pipeline that strings them together.

pub mod annotator;
pub mod candidates;
pub mod canonical;
pub mod lexicon;
pub mod matrix;
pub mod pipeline;
pub mod snapshot;
pub mod validation;

pub use annotator::RuleAnnotator;
pub use canonical::Canonicalizer;
pub use lexicon::{LexiconHandle, LexiconLoader, TechnicalLexicon};
pub use pipeline::{ScanOutput, ScanPipeline, ScanSettings, ScanStats};
pub use snapshot::SnapshotCell;
pub use validation::{ScoringWeights, Validator};
