//! Content blocks
//!
//! A [`Block`] is one contiguous unit of classified rows. Blocks are produced
//! by the [`BlockAccumulator`](crate::BlockAccumulator) and never change
//! afterwards.

use duke_layout_core::Row;

/// Inclusive range of row indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowSpan {
    pub first: u32,
    pub last: u32,
}

impl RowSpan {
    /// A span covering a single row
    pub fn single(row: u32) -> Self {
        Self {
            first: row,
            last: row,
        }
    }

    /// Check if a row index falls inside the span
    pub fn contains(&self, row: u32) -> bool {
        (self.first..=self.last).contains(&row)
    }

    /// Number of rows covered
    pub fn len(&self) -> u32 {
        self.last - self.first + 1
    }
}

/// One classified content unit
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Document title
    Title { row: u32, text: String },
    /// Section heading
    SectionHeader { row: u32, text: String },
    /// Consecutive table rows, in order
    Table { rows: Vec<Row> },
    /// Consecutive prose lines
    Paragraph { span: RowSpan, lines: Vec<String> },
    /// Disclaimer text
    Footer { row: u32, text: String },
}

impl Block {
    /// Rows covered by the block
    pub fn span(&self) -> RowSpan {
        match self {
            Block::Title { row, .. } | Block::SectionHeader { row, .. } | Block::Footer { row, .. } => {
                RowSpan::single(*row)
            }
            Block::Table { rows } => RowSpan {
                first: rows.first().map(|r| r.index).unwrap_or(0),
                last: rows.last().map(|r| r.index).unwrap_or(0),
            },
            Block::Paragraph { span, .. } => *span,
        }
    }

    /// Short lowercase name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Title { .. } => "title",
            Block::SectionHeader { .. } => "section_header",
            Block::Table { .. } => "table",
            Block::Paragraph { .. } => "paragraph",
            Block::Footer { .. } => "footer",
        }
    }

    /// Row indices belonging to the block, in order
    pub fn row_indices(&self) -> Vec<u32> {
        match self {
            Block::Table { rows } => rows.iter().map(|r| r.index).collect(),
            other => {
                let span = other.span();
                (span.first..=span.last).collect()
            }
        }
    }

    /// One-line summary for outlines and logs
    pub fn summary(&self) -> String {
        match self {
            Block::Title { text, .. }
            | Block::SectionHeader { text, .. }
            | Block::Footer { text, .. } => text.clone(),
            Block::Table { rows } => format!("{} rows", rows.len()),
            Block::Paragraph { lines, .. } => lines.first().cloned().unwrap_or_default(),
        }
    }
}
