//! End-to-end engine tests: extraction, write-through, adjudication and
//! learning behind the facade.

use rolecall_core::config::RolecallConfig;
use rolecall_core::errors::RolecallErrorCode;
use rolecall_core::traits::{Cancellable, CancellationToken};
use rolecall_engine::{
    DocumentInput, DocumentOutcome, EngineError, Paragraph, RoleDetails, RoleEngine, RoleFilter,
    RoleStatus,
};

fn scenario_a() -> DocumentInput {
    DocumentInput::from_prose(
        "doc-a",
        ["The Project Manager (PM) shall approve all deliverables."],
    )
}

fn scenario_b() -> DocumentInput {
    DocumentInput::from_prose("doc-b", ["PM sign-off required."])
}

#[test]
fn scenario_a_extracts_one_role() {
    let engine = RoleEngine::open_in_memory().unwrap();
    let roles = engine.extract(&scenario_a()).unwrap();

    assert_eq!(roles.len(), 1);
    let pm = &roles[0];
    assert_eq!(pm.canonical_name, "Project Manager");
    assert!(pm.aliases.contains("PM"));
    assert!(pm.confidence.value() >= 0.90);
    assert_eq!(pm.mention_count, 1);
    assert!(!pm.is_deliverable);

    // extract never writes
    assert!(engine.roles(&RoleFilter::default()).unwrap().is_empty());
}

#[test]
fn scenario_b_merges_into_the_stored_role() {
    let engine = RoleEngine::open_in_memory().unwrap();
    engine.scan(&scenario_a()).unwrap();
    engine.scan(&scenario_b()).unwrap();

    let stored = engine.role("Project Manager").unwrap().unwrap();
    assert_eq!(stored.mention_count, 2);
    assert_eq!(stored.document_ids.len(), 2);
    assert!(stored.aliases.contains("PM"));
    assert_eq!(stored.status, RoleStatus::Pending);
    assert_eq!(engine.roles(&RoleFilter::default()).unwrap().len(), 1);
}

#[test]
fn rescanning_a_document_is_idempotent() {
    let engine = RoleEngine::open_in_memory().unwrap();
    engine.scan(&scenario_a()).unwrap();
    engine.scan(&scenario_a()).unwrap();

    let stored = engine.role("project manager").unwrap().unwrap();
    assert_eq!(stored.mention_count, 1);
    assert_eq!(stored.document_ids.len(), 1);
}

#[test]
fn scenario_c_matrix_row_boosts_to_full_confidence() {
    let engine = RoleEngine::open_in_memory().unwrap();
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
    engine.scan(&doc).unwrap();

    let stored = engine.role("Thermal Analyst").unwrap().unwrap();
    assert!((stored.max_confidence.value() - 1.0).abs() < 1e-9);
}

#[test]
fn stored_name_reads_and_adjudicates_its_role() {
    let engine = RoleEngine::open_in_memory().unwrap();
    engine
        .scan(&DocumentInput::from_prose(
            "doc-p",
            ["The Programme Manager shall approve the plan."],
        ))
        .unwrap();

    let listed = engine.roles(&RoleFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    let shown = listed[0].canonical_name.clone();
    assert_eq!(shown, "Program Manager");
    assert!(listed[0].aliases.contains("Programme Manager"));

    let stored = engine.role(&shown).unwrap().unwrap();
    assert_eq!(stored.key, listed[0].key);

    let outcome = engine
        .review_desk("ivan")
        .set_status(&shown, RoleStatus::Confirmed)
        .unwrap();
    assert_eq!(outcome.updates[0].role.status, RoleStatus::Confirmed);
    assert_eq!(engine.role(&shown).unwrap().unwrap().status, RoleStatus::Confirmed);
}

#[test]
fn human_status_survives_rescans() {
    let engine = RoleEngine::open_in_memory().unwrap();
    engine.scan(&scenario_a()).unwrap();

    let desk = engine.review_desk("alice");
    desk.set_status("Project Manager", RoleStatus::Deliverable).unwrap();
    desk.update_details(
        "Project Manager",
        &RoleDetails {
            notes: Some("Signs every CDRL".to_string()),
            ..RoleDetails::default()
        },
    )
    .unwrap();

    engine.scan(&scenario_b()).unwrap();
    engine.scan(&scenario_a()).unwrap();

    let stored = engine.role("Project Manager").unwrap().unwrap();
    assert_eq!(stored.status, RoleStatus::Deliverable);
    assert_eq!(stored.notes.as_deref(), Some("Signs every CDRL"));
    assert_eq!(stored.mention_count, 2);
    assert_eq!(engine.status_history("Project Manager").unwrap().len(), 1);
}

#[test]
fn rejection_teaches_the_next_scan() {
    let engine = RoleEngine::open_in_memory().unwrap();
    let doc = DocumentInput::from_prose("doc-1", ["The Integration Lead shall schedule reviews."]);
    engine.scan(&doc).unwrap();
    let version = engine.lexicon_version();

    let outcome = engine
        .review_desk("bob")
        .set_status("Integration Lead", RoleStatus::Rejected)
        .unwrap();
    assert_eq!(outcome.updates.len(), 1);
    assert_eq!(outcome.learning.lexicon_version, Some(version + 1));
    assert_eq!(engine.lexicon_version(), version + 1);

    assert!(engine.extract(&doc).unwrap().is_empty());
}

#[test]
fn confirmation_teaches_new_titles() {
    let engine = RoleEngine::open_in_memory().unwrap();
    let doc = DocumentInput::from_prose(
        "doc-1",
        ["The Flight Readiness Lead (FRL) shall convene the review."],
    );
    engine.scan(&doc).unwrap();
    engine
        .review_desk("carol")
        .set_status("Flight Readiness Lead", RoleStatus::Confirmed)
        .unwrap();

    // a bare acronym now resolves through the learned lexicon
    let roles = engine
        .extract(&DocumentInput::from_prose("doc-2", ["FRL approval is required."]))
        .unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].key, "flight readiness lead");
}

#[test]
fn batch_status_is_atomic_through_the_facade() {
    let engine = RoleEngine::open_in_memory().unwrap();
    engine.scan(&scenario_a()).unwrap();

    let err = engine
        .review_desk("dana")
        .batch_set_status(&[
            ("Project Manager", RoleStatus::Confirmed),
            ("Imaginary Role", RoleStatus::Confirmed),
        ])
        .err()
        .unwrap();
    assert_eq!(err.error_code(), "ROLE_NOT_FOUND");
    assert_eq!(
        engine.role("Project Manager").unwrap().unwrap().status,
        RoleStatus::Pending
    );
}

#[test]
fn batch_scan_reports_every_document() {
    let engine = RoleEngine::open_in_memory().unwrap();
    let docs = vec![
        scenario_a(),
        scenario_b(),
        DocumentInput::from_prose("", ["The Safety Officer shall stop work."]),
    ];
    let report = engine.scan_batch(&docs, &CancellationToken::new());

    assert_eq!(report.documents.len(), 3);
    assert_eq!(report.scanned(), 2);
    assert_eq!(report.failed(), 1);
    match report.documents.last().unwrap() {
        DocumentOutcome::Failed { error, .. } => {
            assert_eq!(error.error_code(), "MALFORMED_INPUT")
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(engine.role("Project Manager").unwrap().unwrap().mention_count, 2);
}

#[test]
fn cancelled_batch_writes_nothing() {
    let engine = RoleEngine::open_in_memory().unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = engine.scan_batch(&[scenario_a(), scenario_b()], &cancel);
    assert_eq!(report.cancelled(), 2);
    assert!(report.get("doc-a").is_some());
    assert!(engine.roles(&RoleFilter::default()).unwrap().is_empty());
}

#[test]
fn file_backed_engine_reloads_learning() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = RolecallConfig::default();
    config.storage.db_path = Some(dir.path().join("roles.db").display().to_string());

    let doc = DocumentInput::from_prose("doc-1", ["The Integration Lead shall schedule reviews."]);
    {
        let engine = RoleEngine::open(config.clone()).unwrap();
        engine.scan(&doc).unwrap();
        engine
            .review_desk("erin")
            .set_status("Integration Lead", RoleStatus::Rejected)
            .unwrap();
        engine.checkpoint().unwrap();
    }

    let reopened = RoleEngine::open(config).unwrap();
    assert!(reopened.lexicon().is_excluded("integration lead"));
    assert!(reopened.extract(&doc).unwrap().is_empty());
    assert_eq!(
        reopened.role("Integration Lead").unwrap().unwrap().status,
        RoleStatus::Rejected
    );
}

#[test]
fn corrupt_lexicon_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lexicon.toml");
    std::fs::write(&path, "version = 1\nsuffixes = []\n").unwrap();

    let mut config = RolecallConfig::default();
    config.extraction.lexicon_path = Some(path.display().to_string());
    let err = RoleEngine::open(config).err().unwrap();
    assert!(matches!(err, EngineError::Lexicon(_)));
    assert_eq!(err.error_code(), "LEXICON_CORRUPT");

    let mut missing = RolecallConfig::default();
    missing.extraction.lexicon_path = Some(dir.path().join("absent.toml").display().to_string());
    let err = RoleEngine::open(missing).err().unwrap();
    assert_eq!(err.error_code(), "LEXICON_LOAD_FAILED");
}
