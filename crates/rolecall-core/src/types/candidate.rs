//! Raw role candidates produced by the generator strategies.

use serde::{Deserialize, Serialize};

use super::document::Span;

/// Pattern-strategy rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternRule {
    /// Capitalized multi-word phrase ending in a role suffix.
    RoleSuffix,
    /// "Phrase (ACRONYM)" pair.
    AcronymPair,
    /// Subject of a sentence containing a responsibility verb.
    ResponsibilitySubject,
}

impl PatternRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleSuffix => "role_suffix",
            Self::AcronymPair => "acronym_pair",
            Self::ResponsibilitySubject => "responsibility_subject",
        }
    }
}

/// NLP-ensemble sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NlpSource {
    EntityRecognizer,
    Gazetteer,
    DependencySubject,
}

impl NlpSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntityRecognizer => "entity_recognizer",
            Self::Gazetteer => "gazetteer",
            Self::DependencySubject => "dependency_subject",
        }
    }
}

/// Where a candidate came from. The two strategies carry different payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum CandidateOrigin {
    Pattern {
        rule: PatternRule,
        span: Span,
        /// Acronym declared next to the phrase, for `AcronymPair` matches.
        paired_acronym: Option<String>,
    },
    Nlp {
        source: NlpSource,
        label: String,
        /// Head word of the subject phrase, for dependency matches.
        parse_head: Option<String>,
        span: Span,
    },
}

impl CandidateOrigin {
    pub fn span(&self) -> Span {
        match self {
            Self::Pattern { span, .. } | Self::Nlp { span, .. } => *span,
        }
    }

    /// Whether the candidate is the grammatical subject of a responsibility verb.
    pub fn is_responsibility_subject(&self) -> bool {
        matches!(
            self,
            Self::Pattern {
                rule: PatternRule::ResponsibilitySubject,
                ..
            } | Self::Nlp {
                source: NlpSource::DependencySubject,
                ..
            }
        )
    }

    pub fn paired_acronym(&self) -> Option<&str> {
        match self {
            Self::Pattern { paired_acronym, .. } => paired_acronym.as_deref(),
            Self::Nlp { .. } => None,
        }
    }

    /// Stable rule identifier, used for logging and dedup keys.
    pub fn rule_id(&self) -> &'static str {
        match self {
            Self::Pattern { rule, .. } => rule.as_str(),
            Self::Nlp { source, .. } => source.as_str(),
        }
    }
}

/// A candidate role mention. Lives for one scan only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCandidate {
    pub surface_text: String,
    pub normalized_text: String,
    pub document_id: String,
    pub paragraph_index: usize,
    /// Byte range of the mention inside the paragraph.
    pub char_span: Span,
    pub origin: CandidateOrigin,
    pub context_sentence: String,
    /// Paragraph is a table cell.
    pub in_table: bool,
    /// Paragraph belongs to a responsibility-matrix-like table.
    pub in_responsibility_matrix: bool,
}
