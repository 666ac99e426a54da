//! Sentence-boundary and dependency-annotation collaborator.
//!
//! Rolecall does not tokenize or parse on its own. An implementation of
//! `SentenceAnnotator` supplies sentence spans, role-labelled entities, and
//! the grammatical subjects of verbs for one paragraph of text.

use crate::types::Span;

/// A labelled entity span inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityAnnotation {
    pub span: Span,
    pub label: String,
}

/// A grammatical subject and the verb phrase governing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAnnotation {
    pub span: Span,
    /// Head word of the subject phrase.
    pub head: String,
    /// Governing verb phrase, lowercased.
    pub verb: String,
}

/// One sentence with its annotations. All spans are byte offsets into the
/// paragraph text, not the sentence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SentenceAnnotation {
    pub span: Span,
    pub entities: Vec<EntityAnnotation>,
    pub subjects: Vec<SubjectAnnotation>,
}

/// Failure reported by an annotator for one paragraph.
#[derive(Debug, Clone, thiserror::Error)]
#[error("annotator '{annotator}' failed: {message}")]
pub struct AnnotationError {
    pub annotator: String,
    pub message: String,
}

/// Splits a paragraph into annotated sentences.
pub trait SentenceAnnotator: Send + Sync {
    /// Annotate one paragraph. Sentences must be ordered and non-overlapping.
    fn annotate(&self, text: &str) -> Result<Vec<SentenceAnnotation>, AnnotationError>;

    /// Name used in logs and errors.
    fn name(&self) -> &str;
}
