//! RoleEngine: owns the snapshots, the pipeline, the store and the learner.

use std::path::Path;
use std::sync::Arc;

use rolecall_core::config::RolecallConfig;
use rolecall_core::errors::{EngineError, PipelineResult};
use rolecall_core::traits::{CancellationToken, SentenceAnnotator, SightingSink};
use rolecall_core::types::{
    AdjudicatedRole, CanonicalRole, DocumentInput, LearnedPatternTable, RoleFilter, StatusChange,
};
use rolecall_extract::{
    LexiconHandle, LexiconLoader, RuleAnnotator, ScanOutput, ScanPipeline, ScanSettings,
    SnapshotCell, TechnicalLexicon,
};
use rolecall_learning::{AdaptiveLearner, LearnerSettings};
use rolecall_storage::{AdjudicationStore, ScanWriter};

use crate::report::{DocumentOutcome, ScanReport};
use crate::review::ReviewSession;

/// The Rolecall engine. One per store; not a process-wide singleton.
pub struct RoleEngine {
    config: RolecallConfig,
    pipeline: ScanPipeline,
    lexicon: Arc<LexiconHandle>,
    learned: Arc<SnapshotCell<LearnedPatternTable>>,
    store: AdjudicationStore,
    writer: ScanWriter,
    learner: Arc<AdaptiveLearner>,
}

impl RoleEngine {
    /// Open with the built-in rule annotator.
    ///
    /// A lexicon that cannot be loaded, or that persisted additions make
    /// invalid, fails the open.
    pub fn open(config: RolecallConfig) -> Result<Self, EngineError> {
        Self::with_annotator(config, Arc::new(RuleAnnotator))
    }

    /// Open an in-memory engine with default configuration.
    pub fn open_in_memory() -> Result<Self, EngineError> {
        Self::open(RolecallConfig::default())
    }

    /// Open with a caller-supplied sentence annotator.
    pub fn with_annotator(
        config: RolecallConfig,
        annotator: Arc<dyn SentenceAnnotator>,
    ) -> Result<Self, EngineError> {
        RolecallConfig::validate(&config)?;

        let base = match config.extraction.lexicon_path.as_deref() {
            Some(path) => LexiconLoader::load_from_file(Path::new(path))?,
            None => LexiconLoader::builtin()?,
        };

        let settings = ScanSettings::from_config(&config);
        let store = AdjudicationStore::open(&config.storage, settings.sample_context_cap)?;

        let ledger = store.learning_ledger();
        let additions = AdaptiveLearner::load_additions(&ledger)?;
        let lexicon = Arc::new(LexiconHandle::new(base, &additions)?);

        let learner_settings = LearnerSettings::from_config(&config.learning);
        let learned = Arc::new(SnapshotCell::new(AdaptiveLearner::load_learned(
            &ledger,
            learner_settings.min_observations,
        )?));

        let learner = Arc::new(AdaptiveLearner::new(
            ledger,
            Arc::clone(&lexicon),
            Arc::clone(&learned),
            learner_settings,
        ));

        tracing::info!(
            lexicon_version = lexicon.version(),
            learned_patterns = learned.load().len(),
            annotator = annotator.name(),
            in_memory = config.storage.db_path.is_none(),
            "rolecall engine opened"
        );

        Ok(Self {
            writer: store.scan_writer(),
            pipeline: ScanPipeline::new(annotator, settings),
            config,
            lexicon,
            learned,
            store,
            learner,
        })
    }

    /// Extract canonical roles from one document without touching the
    /// store. Paragraph failures are logged and skipped.
    pub fn extract(&self, document: &DocumentInput) -> Result<Vec<CanonicalRole>, EngineError> {
        Ok(self.extract_detailed(document)?.data.roles)
    }

    /// Like `extract`, keeping verdicts, stats and non-fatal errors.
    pub fn extract_detailed(
        &self,
        document: &DocumentInput,
    ) -> Result<PipelineResult<ScanOutput>, EngineError> {
        let lexicon = self.lexicon.snapshot();
        let learned = self.learned.load();
        Ok(self.pipeline.scan(document, &lexicon, &learned)?)
    }

    /// Extract and record sightings.
    pub fn scan(&self, document: &DocumentInput) -> Result<PipelineResult<ScanOutput>, EngineError> {
        let result = self.extract_detailed(document)?;
        self.writer.record_sightings(&result.data.roles)?;
        Ok(result)
    }

    /// Scan documents in parallel against one pinned snapshot pair, then
    /// write each finished document through. Documents not started before
    /// `cancel` fires are reported as cancelled.
    pub fn scan_batch(&self, documents: &[DocumentInput], cancel: &CancellationToken) -> ScanReport {
        let lexicon = self.lexicon.snapshot();
        let learned = self.learned.load();
        let results = self
            .pipeline
            .scan_batch(documents, &lexicon, &learned, cancel);

        let mut report = ScanReport::default();
        for (document, result) in documents.iter().zip(results) {
            report.documents.push(self.write_through(document, result));
        }
        tracing::info!(
            scanned = report.scanned(),
            failed = report.failed(),
            cancelled = report.cancelled(),
            "batch scan finished"
        );
        report
    }

    fn write_through(
        &self,
        document: &DocumentInput,
        result: Result<PipelineResult<ScanOutput>, rolecall_core::errors::ExtractionError>,
    ) -> DocumentOutcome {
        let document_id = document.document_id.clone();
        let scanned = match result {
            Ok(scanned) => scanned,
            Err(rolecall_core::errors::ExtractionError::Cancelled { .. }) => {
                return DocumentOutcome::Cancelled { document_id };
            }
            Err(e) => {
                return DocumentOutcome::Failed {
                    document_id,
                    error: e.into(),
                };
            }
        };
        match self.writer.record_sightings(&scanned.data.roles) {
            Ok(rows_written) => DocumentOutcome::Scanned {
                document_id,
                roles: scanned.data.roles.len(),
                rows_written,
                stats: scanned.data.stats,
                errors: scanned.errors,
            },
            Err(e) => {
                tracing::warn!(document_id = %document_id, error = %e, "sightings not recorded");
                DocumentOutcome::Failed {
                    document_id,
                    error: e.into(),
                }
            }
        }
    }

    /// A reviewer's adjudication handle.
    pub fn review_desk(&self, reviewer: impl Into<String>) -> ReviewSession {
        ReviewSession::new(self.store.review_desk(reviewer), Arc::clone(&self.learner))
    }

    /// Stored roles matching `filter`.
    pub fn roles(&self, filter: &RoleFilter) -> Result<Vec<AdjudicatedRole>, EngineError> {
        Ok(self.store.list(filter)?)
    }

    /// One stored role by name, case-insensitively.
    pub fn role(&self, name: &str) -> Result<Option<AdjudicatedRole>, EngineError> {
        Ok(self.store.get(name)?)
    }

    pub fn status_history(&self, name: &str) -> Result<Vec<StatusChange>, EngineError> {
        Ok(self.store.status_history(name)?)
    }

    /// The lexicon snapshot new scans will use.
    pub fn lexicon(&self) -> Arc<TechnicalLexicon> {
        self.lexicon.snapshot()
    }

    pub fn lexicon_version(&self) -> u64 {
        self.lexicon.version()
    }

    /// The learned-pattern snapshot new scans will use.
    pub fn learned_patterns(&self) -> Arc<LearnedPatternTable> {
        self.learned.load()
    }

    pub fn config(&self) -> &RolecallConfig {
        &self.config
    }

    /// Flush the WAL into the main database file.
    pub fn checkpoint(&self) -> Result<(), EngineError> {
        Ok(self.store.checkpoint()?)
    }
}
