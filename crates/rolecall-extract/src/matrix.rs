//! Responsibility-matrix table detection.
//!
//! A table counts as a responsibility matrix when its cells use at least two
//! distinct RACI-style markers, or when any cell names the table as one.

use std::sync::LazyLock;

use regex::Regex;
use rolecall_core::types::collections::{FxHashMap, FxHashSet};
use rolecall_core::types::Paragraph;

/// Cell values that mark an assignment in a responsibility matrix.
pub const RACI_MARKERS: &[&str] = &[
    "r",
    "a",
    "c",
    "i",
    "s",
    "responsible",
    "accountable",
    "consulted",
    "informed",
    "support",
];

/// Whole-word table titles; "Tracing" or "bureaucracies" must not match.
static MATRIX_TITLE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:raci|responsibility (?:assignment )?matrix)\b").ok()
});

/// Minimum distinct markers before a table is treated as a matrix.
const MIN_DISTINCT_MARKERS: usize = 2;

/// Ids of the tables in `paragraphs` that look like responsibility matrices.
pub fn detect_responsibility_matrices(paragraphs: &[Paragraph]) -> FxHashSet<u32> {
    let mut markers: FxHashMap<u32, FxHashSet<String>> = FxHashMap::default();
    let mut titled: FxHashSet<u32> = FxHashSet::default();

    for paragraph in paragraphs {
        let Some(table_id) = paragraph.table_id.filter(|_| paragraph.is_table_cell) else {
            continue;
        };
        if MATRIX_TITLE.as_ref().is_some_and(|re| re.is_match(&paragraph.text)) {
            titled.insert(table_id);
        }
        let lowered = paragraph.text.to_lowercase();
        if let Some(cell_markers) = cell_markers(&lowered) {
            markers.entry(table_id).or_default().extend(cell_markers);
        }
    }

    markers
        .into_iter()
        .filter(|(_, set)| set.len() >= MIN_DISTINCT_MARKERS)
        .map(|(id, _)| id)
        .chain(titled)
        .collect()
}

/// Markers in a cell, if every token of the cell is a marker ("R/A", "C, I").
fn cell_markers(lowered: &str) -> Option<Vec<String>> {
    let tokens: Vec<&str> = lowered
        .split(|c: char| c == '/' || c == ',' || c == ';' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() || !tokens.iter().all(|t| RACI_MARKERS.contains(t)) {
        return None;
    }
    Some(tokens.into_iter().map(marker_letter).collect())
}

/// "Responsible" and "R" are the same marker.
fn marker_letter(token: &str) -> String {
    token.chars().take(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_raci_tables() {
        let cells = vec![
            Paragraph::table_cell(0, 7, "Thermal Analyst"),
            Paragraph::table_cell(1, 7, "R"),
            Paragraph::table_cell(2, 7, "A/C"),
            Paragraph::table_cell(3, 9, "Item"),
            Paragraph::table_cell(4, 9, "R"),
        ];
        let found = detect_responsibility_matrices(&cells);
        assert!(found.contains(&7));
        assert!(!found.contains(&9));
    }

    #[test]
    fn spelled_out_markers_are_not_double_counted() {
        let cells = vec![
            Paragraph::table_cell(0, 1, "Responsible"),
            Paragraph::table_cell(1, 1, "R"),
        ];
        assert!(detect_responsibility_matrices(&cells).is_empty());
    }

    #[test]
    fn detects_titled_tables() {
        let cells = vec![Paragraph::table_cell(0, 2, "Table 4: RACI for Test Operations")];
        assert!(detect_responsibility_matrices(&cells).contains(&2));
    }

    #[test]
    fn raci_inside_a_word_is_not_a_title() {
        let cells = vec![
            Paragraph::table_cell(0, 1, "Requirements Tracing"),
            Paragraph::table_cell(1, 1, "Thermal Analyst"),
            Paragraph::table_cell(2, 1, "Data veracity and bureaucracies"),
        ];
        assert!(detect_responsibility_matrices(&cells).is_empty());
    }

    #[test]
    fn ignores_prose() {
        let paragraphs = vec![Paragraph::prose(0, "R"), Paragraph::prose(1, "A")];
        assert!(detect_responsibility_matrices(&paragraphs).is_empty());
    }
}
