//! NLP-ensemble strategy: role-tuned entity labels, gazetteer lookup, and
//! dependency subjects of responsibility verbs.

use rolecall_core::traits::SentenceAnnotation;
use rolecall_core::types::{CandidateOrigin, NlpSource, Span};

use super::phrases::{is_responsibility_verb, trim_determiners};
use super::RawMention;
use crate::lexicon::TechnicalLexicon;

/// Entity labels that mark organizational roles.
pub const ROLE_ENTITY_LABELS: &[&str] = &["ROLE", "TITLE", "ORG_ROLE", "JOB_TITLE"];

/// Dependency label recorded for subject mentions.
const SUBJECT_LABEL: &str = "nsubj";

/// Run every NLP source over one paragraph.
pub fn find_mentions(
    text: &str,
    sentences: &[SentenceAnnotation],
    lexicon: &TechnicalLexicon,
) -> Vec<RawMention> {
    let mut mentions = Vec::new();

    for sentence in sentences {
        for entity in &sentence.entities {
            if !ROLE_ENTITY_LABELS
                .iter()
                .any(|l| l.eq_ignore_ascii_case(&entity.label))
            {
                continue;
            }
            if !is_valid_span(text, entity.span) {
                tracing::debug!(start = entity.span.start, end = entity.span.end, "entity span out of bounds");
                continue;
            }
            mentions.push(RawMention {
                surface: entity.span,
                origin: CandidateOrigin::Nlp {
                    source: NlpSource::EntityRecognizer,
                    label: entity.label.to_uppercase(),
                    parse_head: None,
                    span: entity.span,
                },
            });
        }

        for subject in &sentence.subjects {
            if !is_responsibility_verb(&subject.verb) {
                continue;
            }
            if !is_valid_span(text, subject.span) {
                tracing::debug!(start = subject.span.start, end = subject.span.end, "subject span out of bounds");
                continue;
            }
            let Some(span) = trim_determiners(text, subject.span) else {
                continue;
            };
            mentions.push(RawMention {
                surface: span,
                origin: CandidateOrigin::Nlp {
                    source: NlpSource::DependencySubject,
                    label: SUBJECT_LABEL.to_string(),
                    parse_head: Some(subject.head.clone()),
                    span,
                },
            });
        }
    }

    for hit in lexicon.gazetteer().find(text) {
        mentions.push(RawMention {
            surface: hit.span,
            origin: CandidateOrigin::Nlp {
                source: NlpSource::Gazetteer,
                label: hit.kind.label().to_string(),
                parse_head: None,
                span: hit.span,
            },
        });
    }

    mentions
}

fn is_valid_span(text: &str, span: Span) -> bool {
    !span.is_empty() && text.get(span.start..span.end).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolecall_core::traits::{EntityAnnotation, SubjectAnnotation};

    #[test]
    fn keeps_only_role_labels() {
        let text = "Jane Roe, Flight Director, met NASA.";
        let sentence = SentenceAnnotation {
            span: Span::new(0, text.len()),
            entities: vec![
                EntityAnnotation { span: Span::new(0, 8), label: "PERSON".into() },
                EntityAnnotation { span: Span::new(10, 25), label: "title".into() },
                EntityAnnotation { span: Span::new(31, 35), label: "ORG".into() },
            ],
            subjects: vec![],
        };
        let lexicon = TechnicalLexicon::builtin().unwrap();
        let found: Vec<_> = find_mentions(text, &[sentence], &lexicon)
            .into_iter()
            .filter(|m| m.origin.rule_id() == "entity_recognizer")
            .collect();
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].surface.start..found[0].surface.end], "Flight Director");
    }

    #[test]
    fn subjects_need_responsibility_verbs() {
        let text = "The Safety Officer shall stop the test. The Analyst may help.";
        let sentence = SentenceAnnotation {
            span: Span::new(0, text.len()),
            entities: vec![],
            subjects: vec![
                SubjectAnnotation { span: Span::new(0, 18), head: "Officer".into(), verb: "shall".into() },
                SubjectAnnotation { span: Span::new(40, 51), head: "Analyst".into(), verb: "may".into() },
            ],
        };
        let lexicon = TechnicalLexicon::builtin().unwrap();
        let subjects: Vec<_> = find_mentions(text, &[sentence], &lexicon)
            .into_iter()
            .filter(|m| m.origin.is_responsibility_subject())
            .collect();
        assert_eq!(subjects.len(), 1);
        assert_eq!(&text[subjects[0].surface.start..subjects[0].surface.end], "Safety Officer");
    }

    #[test]
    fn ignores_out_of_range_spans() {
        let text = "short";
        let sentence = SentenceAnnotation {
            span: Span::new(0, 5),
            entities: vec![EntityAnnotation { span: Span::new(2, 40), label: "ROLE".into() }],
            subjects: vec![],
        };
        let lexicon = TechnicalLexicon::builtin().unwrap();
        assert!(find_mentions(text, &[sentence], &lexicon).is_empty());
    }
}
