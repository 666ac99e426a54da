//! Upstream document input: ordered paragraphs with table flags.

use serde::{Deserialize, Serialize};

use crate::errors::ExtractionError;

/// Byte range within a paragraph's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether two spans share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One paragraph as supplied by the text-extraction collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Position of the paragraph in the document. Strictly increasing.
    pub index: usize,
    pub text: String,
    pub is_table_cell: bool,
    /// Table the cell belongs to. Required for table cells.
    #[serde(default)]
    pub table_id: Option<u32>,
}

impl Paragraph {
    /// A body-text paragraph.
    pub fn prose(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            is_table_cell: false,
            table_id: None,
        }
    }

    /// A table cell belonging to `table_id`.
    pub fn table_cell(index: usize, table_id: u32, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            is_table_cell: true,
            table_id: Some(table_id),
        }
    }
}

/// A whole document ready for scanning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInput {
    pub document_id: String,
    pub paragraphs: Vec<Paragraph>,
}

impl DocumentInput {
    pub fn new(document_id: impl Into<String>, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            document_id: document_id.into(),
            paragraphs,
        }
    }

    /// Build a document from plain prose paragraphs, indexed in order.
    pub fn from_prose<I, S>(document_id: impl Into<String>, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paragraphs = paragraphs
            .into_iter()
            .enumerate()
            .map(|(i, text)| Paragraph::prose(i, text))
            .collect();
        Self::new(document_id, paragraphs)
    }

    /// Check structural invariants the scanner relies on.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.document_id.trim().is_empty() {
            return Err(ExtractionError::malformed(
                &self.document_id,
                "document id is empty",
            ));
        }
        let mut previous: Option<usize> = None;
        for paragraph in &self.paragraphs {
            if let Some(prev) = previous {
                if paragraph.index <= prev {
                    return Err(ExtractionError::malformed(
                        &self.document_id,
                        format!(
                            "paragraph index {} does not follow {}",
                            paragraph.index, prev
                        ),
                    ));
                }
            }
            if paragraph.is_table_cell && paragraph.table_id.is_none() {
                return Err(ExtractionError::malformed(
                    &self.document_id,
                    format!("table cell {} has no table id", paragraph.index),
                ));
            }
            previous = Some(paragraph.index);
        }
        Ok(())
    }
}
