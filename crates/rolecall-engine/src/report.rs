//! Per-document outcomes of a batch scan.

use rolecall_core::errors::{EngineError, ExtractionError};
use rolecall_extract::ScanStats;

/// What happened to one document in a batch.
#[derive(Debug)]
pub enum DocumentOutcome {
    /// Scanned and written through. `errors` are the non-fatal paragraph
    /// failures.
    Scanned {
        document_id: String,
        roles: usize,
        rows_written: usize,
        stats: ScanStats,
        errors: Vec<ExtractionError>,
    },
    /// The document failed (malformed input or a store write error).
    Failed { document_id: String, error: EngineError },
    /// Cancellation fired before the document started.
    Cancelled { document_id: String },
}

impl DocumentOutcome {
    pub fn document_id(&self) -> &str {
        match self {
            Self::Scanned { document_id, .. }
            | Self::Failed { document_id, .. }
            | Self::Cancelled { document_id } => document_id,
        }
    }

    pub fn is_scanned(&self) -> bool {
        matches!(self, Self::Scanned { .. })
    }
}

/// Outcomes in input order.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub documents: Vec<DocumentOutcome>,
}

impl ScanReport {
    pub fn scanned(&self) -> usize {
        self.documents.iter().filter(|d| d.is_scanned()).count()
    }

    pub fn failed(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| matches!(d, DocumentOutcome::Failed { .. }))
            .count()
    }

    pub fn cancelled(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| matches!(d, DocumentOutcome::Cancelled { .. }))
            .count()
    }

    pub fn get(&self, document_id: &str) -> Option<&DocumentOutcome> {
        self.documents.iter().find(|d| d.document_id() == document_id)
    }
}
