//! Built-in `SentenceAnnotator`: rule-based sentence splitting and
//! heuristic subject detection. Produces no entity labels.

use rolecall_core::traits::{AnnotationError, SentenceAnnotation, SentenceAnnotator, SubjectAnnotation};
use rolecall_core::types::Span;

use crate::candidates::phrases::RESPONSIBILITY_SUBJECT;

/// Tokens that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &["e.g", "i.e", "etc", "vs", "no", "mr", "ms", "dr", "fig", "sec", "para"];

/// Annotator used when no NLP backend is plugged in.
#[derive(Debug, Default, Clone)]
pub struct RuleAnnotator;

impl RuleAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Sentence spans of `text`, trimmed, in order.
    pub fn split_sentences(text: &str) -> Vec<Span> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if !matches!(c, '.' | '!' | '?') {
                continue;
            }
            let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
            if !at_boundary || (c == '.' && ends_with_abbreviation(&text[start..i])) {
                continue;
            }
            push_trimmed(text, start, i + c.len_utf8(), &mut sentences);
            start = i + c.len_utf8();
        }
        push_trimmed(text, start, text.len(), &mut sentences);
        sentences
    }
}

impl SentenceAnnotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<SentenceAnnotation>, AnnotationError> {
        let subject_re = RESPONSIBILITY_SUBJECT.as_ref();
        let annotations = Self::split_sentences(text)
            .into_iter()
            .map(|span| {
                let sentence = &text[span.start..span.end];
                let subjects = subject_re
                    .map(|re| {
                        re.captures_iter(sentence)
                            .filter_map(|caps| {
                                let subject = caps.name("subject")?;
                                let verb = caps.name("verb")?;
                                let head = subject.as_str().split_whitespace().last()?;
                                Some(SubjectAnnotation {
                                    span: Span::new(span.start + subject.start(), span.start + subject.end()),
                                    head: head.to_string(),
                                    verb: verb.as_str().split_whitespace().collect::<Vec<_>>().join(" "),
                                })
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                SentenceAnnotation {
                    span,
                    entities: Vec::new(),
                    subjects,
                }
            })
            .collect();
        Ok(annotations)
    }

    fn name(&self) -> &str {
        "rule"
    }
}

fn ends_with_abbreviation(prefix: &str) -> bool {
    let Some(last) = prefix.split_whitespace().last() else {
        return false;
    };
    let last = last.trim_start_matches('(').to_lowercase();
    // Single initials ("J. Smith") are not sentence ends either.
    ABBREVIATIONS.contains(&last.as_str())
        || (last.chars().count() == 1 && last.chars().all(char::is_alphabetic))
}

fn push_trimmed(text: &str, start: usize, end: usize, out: &mut Vec<Span>) {
    let slice = &text[start..end];
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();
    if start + leading < end - trailing {
        out.push(Span::new(start + leading, end - trailing));
    }
}
