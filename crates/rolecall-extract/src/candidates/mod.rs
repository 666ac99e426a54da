//! Candidate generation: pattern strategy and NLP-ensemble strategy,
//! unioned per paragraph, with shape-based noise removed.

pub mod nlp;
pub mod noise;
pub mod pattern;
pub mod phrases;

pub use noise::{NoiseKind, NoiseThresholds};
pub use phrases::{is_responsibility_verb, RESPONSIBILITY_VERBS};

use rolecall_core::traits::SentenceAnnotation;
use rolecall_core::types::collections::FxHashSet;
use rolecall_core::types::{normalize_role_text, CandidateOrigin, Paragraph, RoleCandidate, Span};

use crate::lexicon::TechnicalLexicon;

/// A strategy hit before it is turned into a `RoleCandidate`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMention {
    /// Byte range of the role text itself.
    pub surface: Span,
    pub origin: CandidateOrigin,
}

/// Where a paragraph sits, as far as candidate metadata is concerned.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphScope<'a> {
    pub document_id: &'a str,
    pub paragraph: &'a Paragraph,
    pub in_responsibility_matrix: bool,
}

/// Produces candidates for one paragraph at a time against a pinned lexicon.
pub struct CandidateGenerator<'a> {
    lexicon: &'a TechnicalLexicon,
    noise: NoiseThresholds,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(lexicon: &'a TechnicalLexicon, noise: NoiseThresholds) -> Self {
        Self { lexicon, noise }
    }

    /// Union both strategies for one paragraph. Candidates with the same
    /// span, normalized text and rule collapse into one.
    pub fn generate(
        &self,
        scope: &ParagraphScope<'_>,
        sentences: &[SentenceAnnotation],
    ) -> Vec<RoleCandidate> {
        let text = scope.paragraph.text.as_str();
        let mut mentions = pattern::find_mentions(text, self.lexicon);
        mentions.extend(nlp::find_mentions(text, sentences, self.lexicon));

        let mut seen: FxHashSet<(Span, String, &'static str)> = FxHashSet::default();
        let mut candidates = Vec::with_capacity(mentions.len());
        for mention in mentions {
            let Some(surface) = text.get(mention.surface.start..mention.surface.end) else {
                continue;
            };
            let surface = surface.trim();
            if let Some(kind) = self.noise.classify(surface) {
                tracing::trace!(surface, ?kind, "dropped noise candidate");
                continue;
            }
            let normalized = normalize_role_text(surface);
            if normalized.is_empty() {
                continue;
            }
            let span = mention.origin.span();
            if !seen.insert((span, normalized.clone(), mention.origin.rule_id())) {
                continue;
            }
            candidates.push(RoleCandidate {
                surface_text: surface.to_string(),
                normalized_text: normalized,
                document_id: scope.document_id.to_string(),
                paragraph_index: scope.paragraph.index,
                char_span: span,
                context_sentence: context_for(scope.paragraph, sentences, span),
                in_table: scope.paragraph.is_table_cell,
                in_responsibility_matrix: scope.in_responsibility_matrix,
                origin: mention.origin,
            });
        }
        candidates
    }
}

/// The sentence holding `span`, or the whole cell for table paragraphs.
fn context_for(paragraph: &Paragraph, sentences: &[SentenceAnnotation], span: Span) -> String {
    let text = paragraph.text.as_str();
    if paragraph.is_table_cell {
        return text.trim().to_string();
    }
    sentences
        .iter()
        .find(|s| s.span.start <= span.start && span.start < s.span.end)
        .and_then(|s| text.get(s.span.start..s.span.end))
        .unwrap_or(text)
        .trim()
        .to_string()
}
