//! Tests for the error taxonomy and error codes.

use std::collections::HashSet;

use rolecall_core::errors::error_code::RolecallErrorCode;
use rolecall_core::errors::*;

#[test]
fn every_error_has_a_code() {
    let codes = [
        ExtractionError::malformed("doc", "empty").error_code(),
        ExtractionError::ParagraphFailed {
            document_id: "doc".into(),
            paragraph_index: 3,
            message: "boom".into(),
        }
        .error_code(),
        LexiconError::corrupt("no roles").error_code(),
        LexiconError::Parse {
            path: "x".into(),
            message: "bad".into(),
        }
        .error_code(),
        StorageError::WriteConflict {
            canonical_name: "Project Manager".into(),
            requested_status: Some("confirmed".into()),
            message: "busy".into(),
        }
        .error_code(),
        StorageError::RoleNotFound {
            canonical_name: "x".into(),
            requested_status: None,
        }
        .error_code(),
        ConfigError::FileNotFound { path: "/tmp".into() }.error_code(),
    ];
    for code in codes {
        assert!(!code.is_empty());
    }
    let unique: HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), codes.len());
}

#[test]
fn write_errors_carry_name_and_status() {
    let err = StorageError::WriteFailed {
        canonical_name: "Safety Officer".into(),
        requested_status: Some("rejected".into()),
        message: "disk full".into(),
    };
    let text = err.to_string();
    assert!(text.contains("Safety Officer"));
    assert!(text.contains("rejected"));
    assert_eq!(err.canonical_name(), Some("Safety Officer"));
    assert!(!err.is_conflict());
}

#[test]
fn engine_error_delegates_codes() {
    let engine: EngineError = LexiconError::corrupt("empty").into();
    assert_eq!(engine.error_code(), error_code::LEXICON_CORRUPT);
    assert!(engine.coded_string().starts_with("[LEXICON_CORRUPT]"));
}

#[test]
fn pipeline_result_collects_errors() {
    let mut result: PipelineResult<Vec<u32>> = PipelineResult::new(vec![1]);
    assert!(result.is_clean());
    result.add_error(ExtractionError::AnnotationFailed {
        paragraph_index: 0,
        message: "x".into(),
    });
    let mapped = result.map(|v| v.len());
    assert_eq!(mapped.data, 1);
    assert_eq!(mapped.error_count(), 1);
}
