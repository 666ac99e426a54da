//! Step 1 of validation: linguistic noise checks on normalized text.

use rolecall_core::types::ReasonCode;

/// A candidate starting with one of these is never a role.
pub const FUNCTION_WORD_PREFIXES: &[&str] =
    &["the", "a", "an", "contract", "provide", "responsible"];

/// Verbs and prepositions that betray a clause rather than a noun phrase.
pub const CONNECTOR_WORDS: &[&str] = &["is", "are", "shall", "will", "for"];

/// Words a role title does not end with.
pub const NON_NOMINAL_ENDINGS: &[&str] = &["begins", "ends", "various", "overall"];

/// Connector words are checked in word positions 2 through 4.
const CONNECTOR_POSITIONS: std::ops::Range<usize> = 1..4;

/// Reason code when `normalized` is linguistic noise.
pub fn check(normalized: &str) -> Option<ReasonCode> {
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let first = *words.first()?;

    if FUNCTION_WORD_PREFIXES.contains(&first) {
        return Some(ReasonCode::NoisePrefix);
    }

    let end = CONNECTOR_POSITIONS.end.min(words.len());
    if CONNECTOR_POSITIONS.start < end
        && words[CONNECTOR_POSITIONS.start..end]
            .iter()
            .any(|w| CONNECTOR_WORDS.contains(w))
    {
        return Some(ReasonCode::NoiseConnector);
    }

    if words
        .last()
        .is_some_and(|w| NON_NOMINAL_ENDINGS.contains(w))
    {
        return Some(ReasonCode::NoiseSuffix);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_function_word_prefix() {
        assert_eq!(check("the project manager"), Some(ReasonCode::NoisePrefix));
        assert_eq!(check("contract manager"), Some(ReasonCode::NoisePrefix));
    }

    #[test]
    fn flags_connectors_in_positions_two_to_four() {
        assert_eq!(check("manager is late"), Some(ReasonCode::NoiseConnector));
        assert_eq!(check("x y z shall"), Some(ReasonCode::NoiseConnector));
        assert_eq!(check("w x y z shall"), None);
    }

    #[test]
    fn flags_non_nominal_endings() {
        assert_eq!(check("test phase begins"), Some(ReasonCode::NoiseSuffix));
    }

    #[test]
    fn accepts_plain_titles() {
        assert_eq!(check("project manager"), None);
        assert_eq!(check("pm"), None);
    }
}
