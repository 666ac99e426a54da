//! Stop a batch scan between documents.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::ExtractionError;

/// Consulted before each document of a batch starts. A document already
/// being scanned always finishes and is written through.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    fn cancel(&self);

    /// `Err(Cancelled)` for `document_id` once cancellation was requested.
    fn check(&self, document_id: &str) -> Result<(), ExtractionError> {
        if self.is_cancelled() {
            return Err(ExtractionError::Cancelled {
                document_id: document_id.to_string(),
            });
        }
        Ok(())
    }
}

/// Shared flag; clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }
}
