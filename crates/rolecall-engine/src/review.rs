//! Human adjudication bound to a reviewer, with learning after each commit.

use std::sync::Arc;

use rolecall_core::errors::EngineError;
use rolecall_core::types::{AdjudicatedRole, RoleDetails, RoleStatus};
use rolecall_learning::{AdaptiveLearner, LearningOutcome};
use rolecall_storage::{ReviewDesk, StatusUpdate};

/// Result of a status decision. The status change is committed before
/// learning runs.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub updates: Vec<StatusUpdate>,
    pub learning: LearningOutcome,
}

/// A reviewer's handle on the store.
pub struct ReviewSession {
    desk: ReviewDesk,
    learner: Arc<AdaptiveLearner>,
}

impl ReviewSession {
    pub(crate) fn new(desk: ReviewDesk, learner: Arc<AdaptiveLearner>) -> Self {
        Self { desk, learner }
    }

    pub fn reviewer(&self) -> &str {
        self.desk.reviewer()
    }

    pub fn set_status(&self, name: &str, status: RoleStatus) -> Result<ReviewOutcome, EngineError> {
        let update = self.desk.set_status(name, status)?;
        self.learn(vec![update])
    }

    /// All-or-nothing status changes, learned from as one pass.
    pub fn batch_set_status<S: AsRef<str>>(
        &self,
        updates: &[(S, RoleStatus)],
    ) -> Result<ReviewOutcome, EngineError> {
        let applied = self.desk.batch_set_status(updates)?;
        self.learn(applied)
    }

    /// Edit category, notes and tags. Not a decision, so nothing is learned.
    pub fn update_details(&self, name: &str, details: &RoleDetails) -> Result<AdjudicatedRole, EngineError> {
        Ok(self.desk.update_details(name, details)?)
    }

    fn learn(&self, updates: Vec<StatusUpdate>) -> Result<ReviewOutcome, EngineError> {
        let learning = self
            .learner
            .on_status_changes(&updates, self.desk.reviewer())
            .map_err(|e| {
                tracing::warn!(error = %e, "status committed but learning failed");
                e
            })?;
        Ok(ReviewOutcome { updates, learning })
    }
}
