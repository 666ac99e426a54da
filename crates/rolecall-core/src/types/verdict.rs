//! Validator output.

use serde::{Deserialize, Serialize};

use super::candidate::RoleCandidate;
use super::confidence::Confidence;

/// Why the validator decided the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Starts with a function word.
    NoisePrefix,
    /// Connector word in positions 2 to 4.
    NoiseConnector,
    /// Ends in a non-nominal word.
    NoiseSuffix,
    /// Listed in the exclusion set.
    Excluded,
    /// Institutional common noun in a responsibility context.
    ContextualCategory,
    /// Known role title, alias, or acronym.
    KnownRole,
    /// Ends in a role suffix.
    RoleSuffix,
    /// Nothing matched.
    NoMatch,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoisePrefix => "noise_prefix",
            Self::NoiseConnector => "noise_connector",
            Self::NoiseSuffix => "noise_suffix",
            Self::Excluded => "excluded",
            Self::ContextualCategory => "contextual_category",
            Self::KnownRole => "known_role",
            Self::RoleSuffix => "role_suffix",
            Self::NoMatch => "no_match",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(
            self,
            Self::ContextualCategory | Self::KnownRole | Self::RoleSuffix
        )
    }
}

/// Verdict on one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCandidateVerdict {
    pub candidate: RoleCandidate,
    pub valid: bool,
    pub confidence: Confidence,
    pub reason_code: ReasonCode,
    /// Category from the lexicon entry or suffix that matched.
    pub category: Option<String>,
    /// Canonical title when the lexicon matched a known role or alias.
    pub lexicon_canonical: Option<String>,
    /// Lexicon marks the role as a deliverable owner.
    pub is_deliverable: bool,
}

impl RoleCandidateVerdict {
    /// An invalid verdict always carries zero confidence.
    pub fn invalid(candidate: RoleCandidate, reason_code: ReasonCode) -> Self {
        Self {
            candidate,
            valid: false,
            confidence: Confidence::ZERO,
            reason_code,
            category: None,
            lexicon_canonical: None,
            is_deliverable: false,
        }
    }
}
