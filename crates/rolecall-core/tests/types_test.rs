//! Property and unit tests for core types.

use proptest::prelude::*;
use rolecall_core::types::*;

proptest! {
    #[test]
    fn confidence_always_in_unit_interval(base in -5.0f64..5.0, delta in -5.0f64..5.0) {
        let c = Confidence::new(base).adjusted(delta);
        prop_assert!((0.0..=1.0).contains(&c.value()));
    }

    #[test]
    fn learned_delta_stays_bounded(moves in proptest::collection::vec(any::<bool>(), 0..40)) {
        let mut p = LearnedPattern::new("key");
        for up in moves {
            p.observe(if up { Observation::Promote } else { Observation::Demote });
            prop_assert!(p.confidence_delta.abs() <= 0.3 + 1e-9);
        }
    }

    #[test]
    fn normalization_is_idempotent(s in "[A-Za-z &'/-]{0,40}") {
        let once = normalize_role_text(&s);
        prop_assert_eq!(normalize_role_text(&once), once);
    }
}

#[test]
fn table_gates_on_observation_count() {
    let mut pattern = LearnedPattern::new("systems engineer");
    pattern.observe(Observation::Promote);
    let table = LearnedPatternTable::from_patterns([pattern.clone()], 2);
    assert_eq!(table.effective_delta("systems engineer"), 0.0);

    pattern.observe(Observation::Promote);
    let table = LearnedPatternTable::from_patterns([pattern], 2);
    assert!((table.effective_delta("systems engineer") - 0.10).abs() < 1e-9);
    assert_eq!(table.effective_delta("unknown"), 0.0);
}

#[test]
fn origin_reports_subject_kinds() {
    let subject = CandidateOrigin::Nlp {
        source: NlpSource::DependencySubject,
        label: "nsubj".into(),
        parse_head: Some("Manager".into()),
        span: Span::new(0, 15),
    };
    assert!(subject.is_responsibility_subject());
    let pair = CandidateOrigin::Pattern {
        rule: PatternRule::AcronymPair,
        span: Span::new(0, 20),
        paired_acronym: Some("PM".into()),
    };
    assert!(!pair.is_responsibility_subject());
    assert_eq!(pair.paired_acronym(), Some("PM"));
}

#[test]
fn empty_sentence_annotation_has_an_empty_span() {
    let annotation = rolecall_core::traits::SentenceAnnotation::default();
    assert!(annotation.span.is_empty());
    assert!(annotation.entities.is_empty() && annotation.subjects.is_empty());
}
