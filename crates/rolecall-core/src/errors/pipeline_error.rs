//! Non-fatal error collection for scans.

use super::ExtractionError;

/// Result of a scan that accumulates non-fatal errors.
/// Allows partial results to be returned even when some paragraphs fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the scan.
    pub errors: Vec<ExtractionError>,
}

impl<T: Default> PipelineResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: ExtractionError) {
        self.errors.push(error);
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Transform the data while keeping collected errors.
    pub fn map<U: Default>(self, f: impl FnOnce(T) -> U) -> PipelineResult<U> {
        PipelineResult {
            data: f(self.data),
            errors: self.errors,
        }
    }
}
