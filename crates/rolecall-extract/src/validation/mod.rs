//! Validator/Scorer: turns a candidate into a verdict.
//!
//! Evaluation order is fixed and short-circuits:
//! 1. linguistic noise
//! 2. exclusion set
//! 3. contextual category (responsibility subjects and table cells only)
//! 4. known role, alias or acronym
//! 5. role suffix
//! 6. no match
//!
//! Valid verdicts then get the responsibility-matrix boost and the learned
//! delta. Invalid verdicts always carry zero confidence.

pub mod noise_filter;
pub mod scoring;

pub use scoring::ScoringWeights;

use rolecall_core::types::{LearnedPatternTable, ReasonCode, RoleCandidate, RoleCandidateVerdict};

use crate::lexicon::TechnicalLexicon;

/// Base decision before post-base adjustments.
struct BaseDecision {
    reason: ReasonCode,
    confidence: f64,
    category: Option<String>,
    lexicon_canonical: Option<String>,
    is_deliverable: bool,
}

/// Pure verdict function over a pinned lexicon and learned-pattern table.
pub struct Validator<'a> {
    lexicon: &'a TechnicalLexicon,
    learned: &'a LearnedPatternTable,
    weights: ScoringWeights,
}

impl<'a> Validator<'a> {
    pub fn new(
        lexicon: &'a TechnicalLexicon,
        learned: &'a LearnedPatternTable,
        weights: ScoringWeights,
    ) -> Self {
        Self {
            lexicon,
            learned,
            weights,
        }
    }

    pub fn validate(&self, candidate: RoleCandidate) -> RoleCandidateVerdict {
        let normalized = candidate.normalized_text.as_str();

        if let Some(reason) = noise_filter::check(normalized) {
            return RoleCandidateVerdict::invalid(candidate, reason);
        }
        if self.lexicon.is_excluded(normalized) {
            return RoleCandidateVerdict::invalid(candidate, ReasonCode::Excluded);
        }

        let Some(base) = self.base_decision(&candidate) else {
            return RoleCandidateVerdict::invalid(candidate, ReasonCode::NoMatch);
        };

        let delta = self.learned.effective_delta(normalized);
        let confidence = scoring::finalize(
            base.confidence,
            candidate.in_responsibility_matrix,
            &self.weights,
            delta,
        );

        RoleCandidateVerdict {
            candidate,
            valid: true,
            confidence,
            reason_code: base.reason,
            category: base.category,
            lexicon_canonical: base.lexicon_canonical,
            is_deliverable: base.is_deliverable,
        }
    }

    /// Validate every candidate, preserving order.
    pub fn validate_all(&self, candidates: Vec<RoleCandidate>) -> Vec<RoleCandidateVerdict> {
        candidates.into_iter().map(|c| self.validate(c)).collect()
    }

    /// Steps 3 to 5. `None` means no rule matched.
    fn base_decision(&self, candidate: &RoleCandidate) -> Option<BaseDecision> {
        let normalized = candidate.normalized_text.as_str();

        if candidate.origin.is_responsibility_subject() || candidate.in_table {
            if let Some(category) = self.lexicon.contextual_category(normalized) {
                return Some(BaseDecision {
                    reason: ReasonCode::ContextualCategory,
                    confidence: self.weights.contextual,
                    category: category.map(str::to_string),
                    lexicon_canonical: None,
                    is_deliverable: false,
                });
            }
        }

        if let Some(lookup) = self.lexicon.resolve(&candidate.surface_text) {
            return Some(BaseDecision {
                reason: ReasonCode::KnownRole,
                confidence: self.weights.known_role * lookup.weight(),
                category: lookup.shared_category().map(str::to_string),
                lexicon_canonical: lookup.unique().map(|r| r.canonical.clone()),
                is_deliverable: lookup.unique().is_some_and(|r| r.is_deliverable),
            });
        }

        let words: Vec<&str> = normalized.split_whitespace().collect();
        if words.len() >= 2 {
            if let Some(category) = words.last().and_then(|w| self.lexicon.suffix_category(w)) {
                return Some(BaseDecision {
                    reason: ReasonCode::RoleSuffix,
                    confidence: self.weights.suffix,
                    category: category.map(str::to_string),
                    lexicon_canonical: None,
                    is_deliverable: false,
                });
            }
        }
        None
    }
}
