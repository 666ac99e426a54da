//! Classify a human decision against the automatic verdict.

use rolecall_core::types::{Observation, RoleStatus};
use rolecall_storage::StatusUpdate;

/// Whether a status change disagrees with what the validator concluded.
///
/// - rejected, although the validator accepted the role → `Demote`
/// - confirmed or deliverable, although the recorded confidence stayed below
///   `confirm_threshold` → `Promote`
///
/// Re-setting the same status and moving back to pending are not
/// observations.
pub fn classify_disagreement(update: &StatusUpdate, confirm_threshold: f64) -> Option<Observation> {
    if update.is_noop() {
        return None;
    }
    let confidence = update.role.max_confidence.value();
    let validator_accepted = confidence > 0.0;
    match update.change.to_status {
        RoleStatus::Rejected if validator_accepted => Some(Observation::Demote),
        status if status.is_accepted() && confidence < confirm_threshold => Some(Observation::Promote),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rolecall_core::types::{AdjudicatedRole, Confidence, StatusChange};

    use super::*;

    fn update(from: RoleStatus, to: RoleStatus, confidence: f64) -> StatusUpdate {
        StatusUpdate {
            change: StatusChange {
                key: "quality lead".to_string(),
                from_status: from,
                to_status: to,
                changed_by: "rev".to_string(),
                changed_at: 0,
            },
            role: AdjudicatedRole {
                key: "quality lead".to_string(),
                canonical_name: "Quality Lead".to_string(),
                status: to,
                category: None,
                function_tags: BTreeSet::new(),
                notes: None,
                aliases: BTreeSet::new(),
                mention_count: 1,
                document_ids: BTreeSet::new(),
                sample_contexts: Vec::new(),
                max_confidence: Confidence::new(confidence),
                is_deliverable: false,
                created_at: 0,
                updated_at: 0,
                updated_by: Some("rev".to_string()),
            },
        }
    }

    #[test]
    fn rejecting_an_accepted_role_demotes() {
        let u = update(RoleStatus::Pending, RoleStatus::Rejected, 0.9);
        assert_eq!(classify_disagreement(&u, 0.9), Some(Observation::Demote));
    }

    #[test]
    fn confirming_a_low_scored_role_promotes() {
        let u = update(RoleStatus::Pending, RoleStatus::Confirmed, 0.88);
        assert_eq!(classify_disagreement(&u, 0.9), Some(Observation::Promote));
        let d = update(RoleStatus::Rejected, RoleStatus::Deliverable, 0.5);
        assert_eq!(classify_disagreement(&d, 0.9), Some(Observation::Promote));
    }

    #[test]
    fn agreement_is_not_an_observation() {
        let high = update(RoleStatus::Pending, RoleStatus::Confirmed, 0.95);
        assert_eq!(classify_disagreement(&high, 0.9), None);
        let at_threshold = update(RoleStatus::Pending, RoleStatus::Confirmed, 0.9);
        assert_eq!(classify_disagreement(&at_threshold, 0.9), None);
        let back = update(RoleStatus::Confirmed, RoleStatus::Pending, 0.5);
        assert_eq!(classify_disagreement(&back, 0.9), None);
        let same = update(RoleStatus::Rejected, RoleStatus::Rejected, 0.9);
        assert_eq!(classify_disagreement(&same, 0.9), None);
    }
}
