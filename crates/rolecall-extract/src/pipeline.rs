//! Scan pipeline for one document: annotate, generate, validate,
//! canonicalize.
//!
//! A paragraph that fails (error or panic) is logged, recorded as a
//! non-fatal error and contributes no candidates. Malformed input fails the
//! whole document before any paragraph is touched.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use rolecall_core::config::RolecallConfig;
use rolecall_core::constants::DEFAULT_SAMPLE_CONTEXT_CAP;
use rolecall_core::errors::{ExtractionError, PipelineResult};
use rolecall_core::traits::{Cancellable, SentenceAnnotator};
use rolecall_core::types::{
    CanonicalRole, DocumentInput, LearnedPatternTable, Paragraph, RoleCandidateVerdict,
};

use crate::annotator::RuleAnnotator;
use crate::candidates::{CandidateGenerator, NoiseThresholds, ParagraphScope};
use crate::canonical::Canonicalizer;
use crate::lexicon::TechnicalLexicon;
use crate::matrix::detect_responsibility_matrices;
use crate::validation::{ScoringWeights, Validator};

/// Tunables resolved from configuration.
#[derive(Debug, Clone, Copy)]
pub struct ScanSettings {
    pub noise: NoiseThresholds,
    pub weights: ScoringWeights,
    pub sample_context_cap: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            noise: NoiseThresholds::default(),
            weights: ScoringWeights::default(),
            sample_context_cap: DEFAULT_SAMPLE_CONTEXT_CAP,
        }
    }
}

impl ScanSettings {
    pub fn from_config(config: &RolecallConfig) -> Self {
        Self {
            noise: NoiseThresholds::from_config(&config.extraction),
            weights: ScoringWeights::from_config(&config.scoring),
            sample_context_cap: config.extraction.effective_sample_context_cap(),
        }
    }
}

/// Counters for one document scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub paragraphs: usize,
    pub raw_candidates: usize,
    pub valid_candidates: usize,
    pub canonical_roles: usize,
    pub failed_paragraphs: usize,
    pub duration_ms: u64,
}

/// Result of scanning one document.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub document_id: String,
    pub lexicon_version: u64,
    pub roles: Vec<CanonicalRole>,
    /// Every verdict, valid or not, in generation order.
    pub verdicts: Vec<RoleCandidateVerdict>,
    pub stats: ScanStats,
}

/// Stateless scanner. Lexicon and learned patterns are passed per call so
/// each scan pins the snapshots it started with.
pub struct ScanPipeline {
    annotator: Arc<dyn SentenceAnnotator>,
    settings: ScanSettings,
}

impl ScanPipeline {
    pub fn new(annotator: Arc<dyn SentenceAnnotator>, settings: ScanSettings) -> Self {
        Self {
            annotator,
            settings,
        }
    }

    /// Pipeline backed by the built-in `RuleAnnotator`.
    pub fn with_rule_annotator(settings: ScanSettings) -> Self {
        Self::new(Arc::new(RuleAnnotator::new()), settings)
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Scan one document.
    pub fn scan(
        &self,
        document: &DocumentInput,
        lexicon: &TechnicalLexicon,
        learned: &LearnedPatternTable,
    ) -> Result<PipelineResult<ScanOutput>, ExtractionError> {
        document.validate()?;

        let span = tracing::info_span!(
            "rolecall.scan",
            document_id = %document.document_id,
            lexicon_version = lexicon.version(),
        );
        let _guard = span.enter();
        let started = Instant::now();

        let matrices = detect_responsibility_matrices(&document.paragraphs);
        let generator = CandidateGenerator::new(lexicon, self.settings.noise);
        let validator = Validator::new(lexicon, learned, self.settings.weights);

        let mut result = PipelineResult::new(ScanOutput {
            document_id: document.document_id.clone(),
            lexicon_version: lexicon.version(),
            ..ScanOutput::default()
        });

        for paragraph in &document.paragraphs {
            let scope = ParagraphScope {
                document_id: &document.document_id,
                paragraph,
                in_responsibility_matrix: paragraph
                    .table_id
                    .is_some_and(|id| paragraph.is_table_cell && matrices.contains(&id)),
            };
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                self.scan_paragraph(&scope, &generator, &validator)
            }));
            let error = match outcome {
                Ok(Ok((raw, verdicts))) => {
                    result.data.stats.raw_candidates += raw;
                    result.data.verdicts.extend(verdicts);
                    continue;
                }
                Ok(Err(e)) => e,
                Err(payload) => ExtractionError::ParagraphFailed {
                    document_id: document.document_id.clone(),
                    paragraph_index: paragraph.index,
                    message: panic_message(payload.as_ref()),
                },
            };
            tracing::warn!(
                paragraph_index = paragraph.index,
                error = %error,
                "paragraph skipped"
            );
            result.data.stats.failed_paragraphs += 1;
            result.add_error(error);
        }

        let roles = Canonicalizer::new(lexicon, self.settings.sample_context_cap)
            .canonicalize(&result.data.verdicts);

        let stats = &mut result.data.stats;
        stats.paragraphs = document.paragraphs.len();
        stats.valid_candidates = result.data.verdicts.iter().filter(|v| v.valid).count();
        stats.canonical_roles = roles.len();
        stats.duration_ms = started.elapsed().as_millis() as u64;
        result.data.roles = roles;

        let stats = &result.data.stats;
        tracing::info!(
            raw_candidates = stats.raw_candidates,
            valid_candidates = stats.valid_candidates,
            canonical_roles = stats.canonical_roles,
            failed_paragraphs = stats.failed_paragraphs,
            scan_duration_ms = stats.duration_ms,
            "document scanned"
        );
        Ok(result)
    }

    /// Scan documents in parallel. Documents not yet started when
    /// `cancel` fires come back as `Cancelled`.
    pub fn scan_batch(
        &self,
        documents: &[DocumentInput],
        lexicon: &TechnicalLexicon,
        learned: &LearnedPatternTable,
        cancel: &(dyn Cancellable + Sync),
    ) -> Vec<Result<PipelineResult<ScanOutput>, ExtractionError>> {
        documents
            .par_iter()
            .map(|document| {
                cancel.check(&document.document_id)?;
                self.scan(document, lexicon, learned)
            })
            .collect()
    }

    /// Annotate, generate and validate one paragraph. Returns the raw
    /// candidate count and the verdicts.
    fn scan_paragraph(
        &self,
        scope: &ParagraphScope<'_>,
        generator: &CandidateGenerator<'_>,
        validator: &Validator<'_>,
    ) -> Result<(usize, Vec<RoleCandidateVerdict>), ExtractionError> {
        let paragraph: &Paragraph = scope.paragraph;
        let sentences = self
            .annotator
            .annotate(&paragraph.text)
            .map_err(|e| ExtractionError::AnnotationFailed {
                paragraph_index: paragraph.index,
                message: e.to_string(),
            })?;
        let candidates = generator.generate(scope, &sentences);
        let raw = candidates.len();
        tracing::debug!(paragraph_index = paragraph.index, raw, "candidates generated");
        Ok((raw, validator.validate_all(candidates)))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "paragraph processing panicked".to_string()
    }
}
