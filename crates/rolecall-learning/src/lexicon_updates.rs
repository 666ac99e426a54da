//! Lexicon additions and retractions implied by one status change.

use rolecall_core::types::{normalize_role_text, LexiconAddition, RoleStatus};
use rolecall_storage::StatusUpdate;

/// What one decision does to the persisted lexicon additions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexiconChange {
    pub add: Vec<LexiconAddition>,
    /// Drop known-role additions resolving to this canonical key.
    pub retract_known_role: Option<String>,
    /// Drop the exclusion addition with this term key.
    pub retract_exclusion: Option<String>,
}

impl LexiconChange {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.retract_known_role.is_none() && self.retract_exclusion.is_none()
    }
}

/// Accepting a role teaches its name and aliases as a known role; rejecting
/// it excludes the name only, so a shared acronym is never excluded. Each
/// decision also withdraws what the opposite decision had taught.
pub fn lexicon_change(update: &StatusUpdate, learned_weight: f64) -> LexiconChange {
    if update.is_noop() {
        return LexiconChange::default();
    }
    let role = &update.role;
    let key = normalize_role_text(&role.canonical_name);

    match update.change.to_status {
        status if status.is_accepted() => {
            let deliverable = role.is_deliverable || status == RoleStatus::Deliverable;
            let mut add = vec![LexiconAddition::known_role(
                role.canonical_name.clone(),
                role.canonical_name.clone(),
                role.category.clone(),
                deliverable,
                learned_weight,
            )];
            add.extend(role.aliases.iter().map(|alias| {
                LexiconAddition::known_role(
                    alias.clone(),
                    role.canonical_name.clone(),
                    role.category.clone(),
                    deliverable,
                    learned_weight,
                )
            }));
            LexiconChange {
                add,
                retract_known_role: None,
                retract_exclusion: Some(key),
            }
        }
        RoleStatus::Rejected => LexiconChange {
            add: vec![LexiconAddition::exclusion(role.canonical_name.clone())],
            retract_known_role: Some(key),
            retract_exclusion: None,
        },
        _ => LexiconChange {
            add: Vec::new(),
            retract_known_role: Some(key.clone()),
            retract_exclusion: Some(key),
        },
    }
}
