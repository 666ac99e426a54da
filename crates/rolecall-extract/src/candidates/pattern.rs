//! Pattern strategy: role-suffix phrases, "Phrase (ACRONYM)" pairs, and
//! subjects of responsibility verbs.

use rolecall_core::types::{CandidateOrigin, PatternRule, Span};

use super::phrases::{
    narrow_to_initials, trim_determiners, word_spans, ACRONYM_PAIR, CAPITALIZED_PHRASE,
    PHRASE_CONNECTORS, RESPONSIBILITY_SUBJECT,
};
use super::RawMention;
use crate::lexicon::TechnicalLexicon;

/// Run every pattern rule over one paragraph.
pub fn find_mentions(text: &str, lexicon: &TechnicalLexicon) -> Vec<RawMention> {
    let mut mentions = Vec::new();
    role_suffix_phrases(text, lexicon, &mut mentions);
    acronym_pairs(text, &mut mentions);
    responsibility_subjects(text, &mut mentions);
    mentions
}

/// Capitalized phrases of two or more words ending in a role suffix. The
/// phrase ends at the rightmost suffix word of the run.
fn role_suffix_phrases(text: &str, lexicon: &TechnicalLexicon, out: &mut Vec<RawMention>) {
    let Some(re) = CAPITALIZED_PHRASE.as_ref() else {
        return;
    };
    for m in re.find_iter(text) {
        let Some(span) = trim_determiners(text, Span::new(m.start(), m.end())) else {
            continue;
        };
        let words = word_spans(text, span);
        let last_suffix = words
            .iter()
            .rposition(|w| lexicon.is_suffix(&text[w.start..w.end]));
        let Some(end_idx) = last_suffix else {
            continue;
        };
        let content_words = words[..=end_idx]
            .iter()
            .filter(|w| !PHRASE_CONNECTORS.contains(&text[w.start..w.end].to_lowercase().as_str()))
            .count();
        if content_words < 2 {
            continue;
        }
        let span = Span::new(words[0].start, words[end_idx].end);
        out.push(RawMention {
            surface: span,
            origin: CandidateOrigin::Pattern {
                rule: PatternRule::RoleSuffix,
                span,
                paired_acronym: None,
            },
        });
    }
}

/// "Phrase (ACRONYM)": the mention is the phrase, spanning through the
/// closing parenthesis.
fn acronym_pairs(text: &str, out: &mut Vec<RawMention>) {
    let Some(re) = ACRONYM_PAIR.as_ref() else {
        return;
    };
    for caps in re.captures_iter(text) {
        let (Some(whole), Some(phrase), Some(acronym)) =
            (caps.get(0), caps.name("phrase"), caps.name("acronym"))
        else {
            continue;
        };
        let Some(trimmed) = trim_determiners(text, Span::new(phrase.start(), phrase.end())) else {
            continue;
        };
        let surface = narrow_to_initials(text, trimmed, acronym.as_str());
        if &text[surface.start..surface.end] == acronym.as_str() {
            continue;
        }
        out.push(RawMention {
            surface,
            origin: CandidateOrigin::Pattern {
                rule: PatternRule::AcronymPair,
                span: Span::new(surface.start, whole.end()),
                paired_acronym: Some(acronym.as_str().to_string()),
            },
        });
    }
}

/// The capitalized noun phrase right before a responsibility verb.
fn responsibility_subjects(text: &str, out: &mut Vec<RawMention>) {
    let Some(re) = RESPONSIBILITY_SUBJECT.as_ref() else {
        return;
    };
    for caps in re.captures_iter(text) {
        let Some(subject) = caps.name("subject") else {
            continue;
        };
        let Some(span) = trim_determiners(text, Span::new(subject.start(), subject.end())) else {
            continue;
        };
        out.push(RawMention {
            surface: span,
            origin: CandidateOrigin::Pattern {
                rule: PatternRule::ResponsibilitySubject,
                span,
                paired_acronym: None,
            },
        });
    }
}
