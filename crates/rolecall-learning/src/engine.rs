//! AdaptiveLearner: applies committed status changes to the lexicon and the
//! learned-pattern table.

use std::sync::{Arc, Mutex};

use rolecall_core::errors::{LearningError, StorageError};
use rolecall_core::types::{normalize_role_text, LearnedPattern, LearnedPatternTable, LexiconAddition, Observation};
use rolecall_extract::{LexiconHandle, SnapshotCell};
use rolecall_storage::{LearningLedger, StatusUpdate};
use tracing::{debug, info};

use crate::feedback::classify_disagreement;
use crate::lexicon_updates::lexicon_change;
use crate::settings::LearnerSettings;

/// What one learner pass changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LearningOutcome {
    /// Additions newly recorded or refreshed.
    pub additions: usize,
    /// Additions withdrawn because a later decision contradicted them.
    pub retractions: usize,
    /// Observations recorded, keyed by pattern.
    pub observations: Vec<(String, Observation)>,
    /// Version of the lexicon snapshot published by this pass, if any.
    pub lexicon_version: Option<u64>,
}

impl LearningOutcome {
    pub fn is_empty(&self) -> bool {
        self.additions == 0 && self.retractions == 0 && self.observations.is_empty()
    }
}

/// Learns from human adjudication.
///
/// Persisted state (additions, patterns) is written in one ledger
/// transaction per pass; the lexicon and pattern snapshots are republished
/// afterwards. Passes are serialized so snapshots are published in commit
/// order. The learner only holds a `LearningLedger`, so it cannot change a
/// role's status.
pub struct AdaptiveLearner {
    ledger: LearningLedger,
    lexicon: Arc<LexiconHandle>,
    learned: Arc<SnapshotCell<LearnedPatternTable>>,
    settings: LearnerSettings,
    pass_lock: Mutex<()>,
}

impl AdaptiveLearner {
    pub fn new(
        ledger: LearningLedger,
        lexicon: Arc<LexiconHandle>,
        learned: Arc<SnapshotCell<LearnedPatternTable>>,
        settings: LearnerSettings,
    ) -> Self {
        Self {
            ledger,
            lexicon,
            learned,
            settings,
            pass_lock: Mutex::new(()),
        }
    }

    /// Persisted lexicon additions, in recording order.
    pub fn load_additions(ledger: &LearningLedger) -> Result<Vec<LexiconAddition>, LearningError> {
        Ok(ledger.additions()?)
    }

    /// Persisted learned patterns as a scoring table.
    pub fn load_learned(
        ledger: &LearningLedger,
        min_observations: u32,
    ) -> Result<LearnedPatternTable, LearningError> {
        let patterns = ledger.patterns()?;
        Ok(LearnedPatternTable::from_patterns(patterns, min_observations))
    }

    pub fn settings(&self) -> &LearnerSettings {
        &self.settings
    }

    /// Apply committed status changes made by `reviewer`.
    pub fn on_status_changes(
        &self,
        updates: &[StatusUpdate],
        reviewer: &str,
    ) -> Result<LearningOutcome, LearningError> {
        if !self.settings.enabled {
            return Ok(LearningOutcome::default());
        }
        let relevant: Vec<&StatusUpdate> = updates.iter().filter(|u| !u.is_noop()).collect();
        let Some(first) = relevant.first() else {
            return Ok(LearningOutcome::default());
        };

        let _guard = self
            .pass_lock
            .lock()
            .map_err(|_| LearningError::Poisoned("learner pass lock"))?;
        let _span = tracing::info_span!("rolecall.learning", reviewer, updates = relevant.len()).entered();

        let settings = self.settings;
        let (mut outcome, patterns) = self.ledger.record(&first.role.canonical_name, |tx| {
            let mut outcome = LearningOutcome::default();
            let mut patterns: Vec<LearnedPattern> = Vec::new();

            for update in &relevant {
                let change = lexicon_change(update, settings.learned_weight);
                if let Some(key) = &change.retract_known_role {
                    outcome.retractions += tx.retract_known_role(key)?;
                }
                if let Some(key) = &change.retract_exclusion {
                    outcome.retractions += tx.retract_exclusion(key)?;
                }
                for addition in &change.add {
                    tx.add(addition, reviewer)?;
                    outcome.additions += 1;
                }

                if let Some(observation) = classify_disagreement(update, settings.confirm_threshold) {
                    let key = update.change.key.clone();
                    let mut pattern = match patterns.iter().position(|p| p.pattern_key == key) {
                        Some(idx) => patterns.swap_remove(idx),
                        None => tx.pattern(&key)?
                            .unwrap_or_else(|| LearnedPattern::new(key.clone())),
                    };
                    pattern.observe_with(observation, settings.step, settings.max_delta);
                    tx.save_pattern(&pattern)?;
                    debug!(
                        pattern = %pattern.pattern_key,
                        delta = pattern.confidence_delta,
                        count = pattern.observation_count,
                        "observation recorded"
                    );
                    outcome.observations.push((key, observation));
                    patterns.push(pattern);
                }
            }
            Ok::<_, StorageError>((outcome, patterns))
        })?;

        if outcome.additions > 0 || outcome.retractions > 0 {
            let additions = Self::load_additions(&self.ledger)?;
            let published = self.lexicon.publish(&additions)?;
            outcome.lexicon_version = Some(published.version());
        }

        if !patterns.is_empty() {
            let mut table = LearnedPatternTable::clone(&self.learned.load());
            for pattern in patterns {
                table.insert(pattern);
            }
            self.learned.store(Arc::new(table));
        }

        info!(
            additions = outcome.additions,
            retractions = outcome.retractions,
            observations = outcome.observations.len(),
            lexicon_version = outcome.lexicon_version,
            "learning pass applied"
        );
        Ok(outcome)
    }

    /// Effective delta the validator would currently apply for `text`.
    pub fn effective_delta(&self, text: &str) -> f64 {
        self.learned.load().effective_delta(&normalize_role_text(text))
    }
}
