//! Core data model: documents, candidates, verdicts, canonical roles,
//! adjudication records, and learned patterns.

pub mod adjudication;
pub mod candidate;
pub mod canonical;
pub mod collections;
pub mod confidence;
pub mod document;
pub mod learned;
pub mod lexicon_addition;
pub mod normalize;
pub mod verdict;

pub use adjudication::{AdjudicatedRole, RoleDetails, RoleFilter, RoleStatus, StatusChange};
pub use candidate::{CandidateOrigin, NlpSource, PatternRule, RoleCandidate};
pub use canonical::CanonicalRole;
pub use confidence::Confidence;
pub use document::{DocumentInput, Paragraph, Span};
pub use learned::{LearnedPattern, LearnedPatternTable, Observation};
pub use lexicon_addition::{AdditionKind, LexiconAddition};
pub use normalize::{is_acronym, normalize_role_text};
pub use verdict::{ReasonCode, RoleCandidateVerdict};
