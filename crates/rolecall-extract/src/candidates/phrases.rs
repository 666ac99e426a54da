//! Shared phrase primitives for the pattern strategy and the rule annotator.

use std::sync::LazyLock;

use regex::Regex;

use rolecall_core::types::Span;

/// Leading words trimmed from a role phrase.
pub const DETERMINERS: &[&str] = &["the", "a", "an", "each", "all", "this", "that", "our"];

/// Short words allowed between capitalized words of a phrase.
pub const PHRASE_CONNECTORS: &[&str] = &["of", "and", "for", "&"];

/// Verb phrases that mark their grammatical subject as a responsible party.
pub const RESPONSIBILITY_VERBS: &[&str] = &[
    "shall",
    "must",
    "owns",
    "approves",
    "will ensure",
    "is responsible for",
    "are responsible for",
];

/// A run of capitalized words, optionally joined by connectors.
const CAPITALIZED_RUN: &str =
    r"[A-Z][A-Za-z\-]*(?:[ \t]+(?:(?:of|and|for|&)[ \t]+)?[A-Z][A-Za-z\-]*)*";

pub(crate) static CAPITALIZED_PHRASE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"\b{CAPITALIZED_RUN}")).ok());

pub(crate) static ACRONYM_PAIR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?P<phrase>{CAPITALIZED_RUN})[ \t]*\((?P<acronym>[A-Z]{{2,6}})\)"
    ))
    .ok()
});

pub(crate) static RESPONSIBILITY_SUBJECT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?P<subject>{CAPITALIZED_RUN})(?:[ \t]*\([A-Z]{{2,6}}\))?[ \t]+(?P<verb>shall|must|owns|approves|will[ \t]+ensure|(?:is|are)[ \t]+responsible[ \t]+for)\b"
    ))
    .ok()
});

/// Whether `verb` (any case or spacing) is a responsibility verb.
pub fn is_responsibility_verb(verb: &str) -> bool {
    let folded = verb
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    RESPONSIBILITY_VERBS.contains(&folded.as_str())
}

/// Whitespace-separated word spans inside `span` of `text`.
pub(crate) fn word_spans(text: &str, span: Span) -> Vec<Span> {
    let slice = &text[span.start..span.end];
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in slice.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push(Span::new(span.start + s, span.start + i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push(Span::new(span.start + s, span.end));
    }
    words
}

/// Drop leading determiners from a phrase. `None` when nothing is left.
pub(crate) fn trim_determiners(text: &str, span: Span) -> Option<Span> {
    let words = word_spans(text, span);
    let first_kept = words.iter().position(|w| {
        let word = text[w.start..w.end].to_lowercase();
        !DETERMINERS.contains(&word.as_str())
    })?;
    Some(Span::new(words[first_kept].start, words[words.len() - 1].end))
}

/// Narrow a phrase to the trailing words whose initials spell `acronym`,
/// skipping connectors. Falls back to the whole phrase.
pub(crate) fn narrow_to_initials(text: &str, span: Span, acronym: &str) -> Span {
    let words = word_spans(text, span);
    let letters: Vec<char> = acronym.chars().collect();
    let mut matched = 0;
    let mut start_idx = None;
    for (idx, w) in words.iter().enumerate().rev() {
        let word = &text[w.start..w.end];
        if PHRASE_CONNECTORS.contains(&word.to_lowercase().as_str()) {
            continue;
        }
        let expected = letters[letters.len() - 1 - matched];
        if word.chars().next() != Some(expected) {
            break;
        }
        matched += 1;
        if matched == letters.len() {
            start_idx = Some(idx);
            break;
        }
    }
    match start_idx {
        Some(idx) => Span::new(words[idx].start, span.end),
        None => span,
    }
}
