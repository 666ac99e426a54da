//! End-to-end scans over the extraction pipeline.

use std::sync::Arc;

use rolecall_core::errors::ExtractionError;
use rolecall_core::traits::{AnnotationError, CancellationToken, Cancellable, SentenceAnnotation, SentenceAnnotator};
use rolecall_core::types::{DocumentInput, LearnedPatternTable, Paragraph, ReasonCode};
use rolecall_extract::lexicon::LexiconLoader;
use rolecall_extract::{RuleAnnotator, ScanPipeline, ScanSettings, TechnicalLexicon};

fn pipeline() -> ScanPipeline {
    ScanPipeline::with_rule_annotator(ScanSettings::default())
}

#[test]
fn test_scenario_a_single_sentence() {
    let lexicon = TechnicalLexicon::builtin().unwrap();
    let doc = DocumentInput::from_prose(
        "doc-a",
        ["The Project Manager (PM) shall approve all deliverables."],
    );
    let result = pipeline()
        .scan(&doc, &lexicon, &LearnedPatternTable::default())
        .unwrap();
    assert!(result.is_clean());

    let roles = &result.data.roles;
    assert_eq!(roles.len(), 1, "roles: {roles:#?}");
    let role = &roles[0];
    assert_eq!(role.canonical_name, "Project Manager");
    assert!(role.aliases.contains("PM"));
    assert!(role.confidence.value() >= 0.90);
    assert_eq!(role.mention_count, 1);
    assert!(!role.is_deliverable);
    assert_eq!(role.mentions_in("doc-a"), 1);
}

#[test]
fn test_scenario_c_matrix_boost() {
    let lexicon = TechnicalLexicon::builtin().unwrap();
    let doc = DocumentInput::new(
        "doc-c",
        vec![
            Paragraph::prose(0, "The Thermal Analyst shall review heat loads."),
            Paragraph::table_cell(1, 4, "Role"),
            Paragraph::table_cell(2, 4, "Approve"),
            Paragraph::table_cell(3, 4, "Thermal Analyst"),
            Paragraph::table_cell(4, 4, "R"),
            Paragraph::table_cell(5, 4, "A"),
        ],
    );
    let result = pipeline()
        .scan(&doc, &lexicon, &LearnedPatternTable::default())
        .unwrap();

    let prose_max = result
        .data
        .verdicts
        .iter()
        .filter(|v| v.valid && v.candidate.paragraph_index == 0)
        .map(|v| v.confidence.value())
        .fold(0.0, f64::max);
    assert!((prose_max - 0.90).abs() < 1e-9);

    let role = result
        .data
        .roles
        .iter()
        .find(|r| r.canonical_name == "Thermal Analyst")
        .unwrap();
    assert_eq!(role.confidence.value(), 1.0);
    assert_eq!(role.mention_count, 2);
}

#[test]
fn test_table_without_matrix_markers_gets_no_boost() {
    let lexicon = TechnicalLexicon::builtin().unwrap();
    let doc = DocumentInput::new(
        "doc-t",
        vec![
            Paragraph::table_cell(0, 1, "Requirements Tracing"),
            Paragraph::table_cell(1, 1, "Thermal Analyst"),
        ],
    );
    let result = pipeline()
        .scan(&doc, &lexicon, &LearnedPatternTable::default())
        .unwrap();

    let role = result
        .data
        .roles
        .iter()
        .find(|r| r.canonical_name == "Thermal Analyst")
        .unwrap();
    assert!((role.confidence.value() - 0.90).abs() < 1e-9);
}

#[test]
fn test_contextual_category_for_subjects() {
    let lexicon = TechnicalLexicon::builtin().unwrap();
    let doc = DocumentInput::from_prose(
        "doc",
        ["The Government shall furnish the test range. Government furnished equipment arrives later."],
    );
    let result = pipeline()
        .scan(&doc, &lexicon, &LearnedPatternTable::default())
        .unwrap();
    let role = result
        .data
        .roles
        .iter()
        .find(|r| r.key == "government")
        .unwrap();
    assert!((role.confidence.value() - 0.88).abs() < 1e-9);
    assert_eq!(role.category.as_deref(), Some("Institutional"));
}

#[test]
fn test_exclusion_always_wins() {
    let toml = r#"
version = 3
suffixes = [{ word = "Manager" }, { word = "Assurance" }]
exclusions = ["Mission Assurance"]

[[roles]]
canonical = "Mission Assurance"
"#;
    let def = LexiconLoader::load_from_str(toml, "test").unwrap();
    let lexicon = TechnicalLexicon::build(&def, &[], def.version).unwrap();
    let doc = DocumentInput::from_prose("doc", ["Mission Assurance shall audit the build."]);
    let result = pipeline()
        .scan(&doc, &lexicon, &LearnedPatternTable::default())
        .unwrap();

    assert!(result.data.roles.is_empty());
    let verdicts: Vec<_> = result
        .data
        .verdicts
        .iter()
        .filter(|v| v.candidate.normalized_text == "mission assurance")
        .collect();
    assert!(!verdicts.is_empty());
    for v in verdicts {
        assert!(!v.valid);
        assert_eq!(v.reason_code, ReasonCode::Excluded);
        assert_eq!(v.confidence.value(), 0.0);
    }
}

#[test]
fn test_ambiguous_acronym_is_document_scoped() {
    let toml = r#"
version = 1
suffixes = [{ word = "Manager" }]

[[roles]]
canonical = "Project Manager"
acronyms = ["PM"]

[[roles]]
canonical = "Program Manager"
acronyms = ["PM"]
"#;
    let def = LexiconLoader::load_from_str(toml, "test").unwrap();
    let lexicon = TechnicalLexicon::build(&def, &[], 1).unwrap();
    let learned = LearnedPatternTable::default();

    let with_expansion = DocumentInput::from_prose(
        "doc-1",
        ["The Program Manager approves the plan.", "PM sign-off required."],
    );
    let roles = pipeline().scan(&with_expansion, &lexicon, &learned).unwrap().data.roles;
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].canonical_name, "Program Manager");
    assert!(roles[0].aliases.contains("PM"));
    assert_eq!(roles[0].mention_count, 2);

    let bare = DocumentInput::from_prose("doc-2", ["PM sign-off required."]);
    let roles = pipeline().scan(&bare, &lexicon, &learned).unwrap().data.roles;
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].canonical_name, "PM");
    assert_eq!(roles[0].key, "pm");
}

#[test]
fn test_alias_only_document_uses_lexicon_key() {
    let lexicon = TechnicalLexicon::builtin().unwrap();
    let doc = DocumentInput::from_prose("doc-b", ["PM sign-off required."]);
    let roles = pipeline()
        .scan(&doc, &lexicon, &LearnedPatternTable::default())
        .unwrap()
        .data
        .roles;
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].canonical_name, "Project Manager");
    assert_eq!(roles[0].key, "project manager");
    assert!(roles[0].aliases.contains("PM"));
}

#[test]
fn test_malformed_document_fails_alone() {
    let lexicon = TechnicalLexicon::builtin().unwrap();
    let doc = DocumentInput::new(
        "doc",
        vec![Paragraph::prose(1, "x"), Paragraph::prose(1, "y")],
    );
    let err = pipeline()
        .scan(&doc, &lexicon, &LearnedPatternTable::default())
        .unwrap_err();
    assert!(matches!(err, ExtractionError::MalformedInput { .. }));
}

struct FlakyAnnotator;

impl SentenceAnnotator for FlakyAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<SentenceAnnotation>, AnnotationError> {
        if text.contains("PANIC") {
            panic!("annotator crashed on purpose");
        }
        if text.contains("FAIL") {
            return Err(AnnotationError {
                annotator: "flaky".into(),
                message: "model unavailable".into(),
            });
        }
        RuleAnnotator::new().annotate(text)
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

#[test]
fn test_bad_paragraphs_are_isolated() {
    let lexicon = TechnicalLexicon::builtin().unwrap();
    let pipeline = ScanPipeline::new(Arc::new(FlakyAnnotator), ScanSettings::default());
    let doc = DocumentInput::from_prose(
        "doc",
        [
            "The Safety Officer shall halt unsafe tests.",
            "PANIC The Chief Engineer shall sign.",
            "FAIL The Data Manager shall archive.",
            "The Test Director must brief the crew.",
        ],
    );
    let result = pipeline
        .scan(&doc, &lexicon, &LearnedPatternTable::default())
        .unwrap();

    assert_eq!(result.error_count(), 2);
    assert_eq!(result.data.stats.failed_paragraphs, 2);
    assert!(result
        .errors
        .iter()
        .any(|e| matches!(e, ExtractionError::ParagraphFailed { paragraph_index: 1, message, .. } if message.contains("on purpose"))));
    assert!(result
        .errors
        .iter()
        .any(|e| matches!(e, ExtractionError::AnnotationFailed { paragraph_index: 2, .. })));

    let names: Vec<_> = result.data.roles.iter().map(|r| r.canonical_name.as_str()).collect();
    assert_eq!(names, vec!["Safety Officer", "Test Director"]);
}

#[test]
fn test_learned_delta_needs_two_observations() {
    use rolecall_core::types::{LearnedPattern, Observation};

    let lexicon = TechnicalLexicon::builtin().unwrap();
    let doc = DocumentInput::from_prose("doc", ["The Thermal Analyst shall review heat loads."]);

    let mut pattern = LearnedPattern::new("thermal analyst");
    pattern.observe(Observation::Demote);
    let once = LearnedPatternTable::from_patterns([pattern.clone()], 2);
    let roles = pipeline().scan(&doc, &lexicon, &once).unwrap().data.roles;
    assert!((roles[0].confidence.value() - 0.90).abs() < 1e-9);

    pattern.observe(Observation::Demote);
    let twice = LearnedPatternTable::from_patterns([pattern], 2);
    let roles = pipeline().scan(&doc, &lexicon, &twice).unwrap().data.roles;
    assert!((roles[0].confidence.value() - 0.80).abs() < 1e-9);
}

#[test]
fn test_batch_respects_cancellation() {
    let lexicon = TechnicalLexicon::builtin().unwrap();
    let docs: Vec<_> = (0..4)
        .map(|i| DocumentInput::from_prose(format!("doc-{i}"), ["The Chief Engineer shall sign."]))
        .collect();
    let learned = LearnedPatternTable::default();

    let token = CancellationToken::new();
    let results = pipeline().scan_batch(&docs, &lexicon, &learned, &token);
    assert!(results.iter().all(|r| r.is_ok()));

    token.cancel();
    let results = pipeline().scan_batch(&docs, &lexicon, &learned, &token);
    assert!(results
        .iter()
        .all(|r| matches!(r, Err(ExtractionError::Cancelled { .. }))));
}
