//! Shape-based noise rejection applied to raw candidates before validation.

use std::sync::LazyLock;

use regex::Regex;

use rolecall_core::config::ExtractionConfig;
use rolecall_core::constants::{
    ACRONYM_MAX_LEN, ACRONYM_MIN_LEN, DEFAULT_MAX_CANDIDATE_LEN, DEFAULT_MAX_NUMERIC_RATIO,
    DEFAULT_MIN_CANDIDATE_LEN,
};
use rolecall_core::types::is_acronym;

static PHONE_SHAPE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\+?(?:\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}$").ok()
});

static ZIP_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d{5}(?:-\d{4})?$").ok());

/// Why a candidate was dropped as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    TooShort,
    TooLong,
    Numeric,
    PhoneNumber,
    ZipCode,
}

/// Length and digit-ratio limits.
#[derive(Debug, Clone, Copy)]
pub struct NoiseThresholds {
    pub min_len: usize,
    pub max_len: usize,
    pub max_numeric_ratio: f64,
}

impl Default for NoiseThresholds {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_CANDIDATE_LEN,
            max_len: DEFAULT_MAX_CANDIDATE_LEN,
            max_numeric_ratio: DEFAULT_MAX_NUMERIC_RATIO,
        }
    }
}

impl NoiseThresholds {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_len: config.effective_min_candidate_len(),
            max_len: config.effective_max_candidate_len(),
            max_numeric_ratio: config.effective_max_numeric_ratio(),
        }
    }

    /// Classify `text`; `None` means it survives.
    pub fn classify(&self, text: &str) -> Option<NoiseKind> {
        let text = text.trim();
        let len = text.chars().count();

        // Short all-caps acronyms ("PM") are exempt from the lower bound.
        if len < self.min_len && !is_acronym(text, ACRONYM_MIN_LEN, ACRONYM_MAX_LEN) {
            return Some(NoiseKind::TooShort);
        }
        if len > self.max_len {
            return Some(NoiseKind::TooLong);
        }
        if ZIP_SHAPE.as_ref().is_some_and(|re| re.is_match(text)) {
            return Some(NoiseKind::ZipCode);
        }
        if PHONE_SHAPE.as_ref().is_some_and(|re| re.is_match(text)) {
            return Some(NoiseKind::PhoneNumber);
        }
        let digits = text.chars().filter(|c| c.is_ascii_digit()).count();
        if len > 0 && digits as f64 / len as f64 > self.max_numeric_ratio {
            return Some(NoiseKind::Numeric);
        }
        None
    }
}
