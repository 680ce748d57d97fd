//! Layout-analysis result types.
//!
//! Mirrors the wire shape returned by a document-analysis service: one flat
//! content buffer, with pages, paragraphs, and tables all addressed by
//! character-offset spans into it.

use serde::{Deserialize, Serialize};

/// Paragraph roles that get re-inserted as heading markup.
pub const ROLE_TITLE: &str = "title";
pub const ROLE_SECTION_HEADING: &str = "sectionHeading";

/// A character-offset span into the flat content buffer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Span {
    pub offset: usize,
    pub length: usize,
}

impl Span {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default)]
    pub role: Option<String>,
    pub spans: Vec<Span>,
}

/// Binds a table to the page it appears on (1-indexed).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingRegion {
    pub page_number: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub row_index: usize,
    pub column_index: usize,
    #[serde(default = "one")]
    pub row_span: usize,
    #[serde(default = "one")]
    pub column_span: usize,
    /// "columnHeader" / "rowHeader" render as `<th>`; anything else as `<td>`.
    #[serde(default)]
    pub kind: Option<String>,
    pub content: String,
}

fn one() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub row_count: usize,
    pub spans: Vec<Span>,
    pub cells: Vec<TableCell>,
    pub bounding_regions: Vec<BoundingRegion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub spans: Vec<Span>,
}

/// The complete analysis result for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResult {
    pub content: String,
    pub pages: Vec<Page>,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub tables: Vec<Table>,
}
