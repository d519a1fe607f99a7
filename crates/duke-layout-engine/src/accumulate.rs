//! Grouping classified rows into blocks
//!
//! [`BlockAccumulator`] is a value folded over the classified rows of a
//! sheet. Title, section header and footer rows become single-row blocks at
//! once; table rows and paragraph lines collect in an open accumulation that
//! is flushed by an empty row, by a row of another kind, or at the end.

use std::mem;

use duke_layout_core::Row;

use crate::block::{Block, RowSpan};
use crate::classify::{ClassifiedRow, RowClass};

#[derive(Debug, Default)]
enum Open {
    #[default]
    None,
    Table(Vec<Row>),
    Paragraph { span: RowSpan, lines: Vec<String> },
}

/// Fold state turning classified rows into [`Block`]s
#[derive(Debug, Default)]
pub struct BlockAccumulator {
    open: Open,
    blocks: Vec<Block>,
}

impl BlockAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next row
    pub fn push(mut self, row: &Row, class: RowClass) -> Self {
        match class {
            RowClass::Empty => self.flush(),
            RowClass::Title => {
                self.flush();
                self.emit(Block::Title {
                    row: row.index,
                    text: first_text(row),
                });
            }
            RowClass::SectionHeader => {
                self.flush();
                self.emit(Block::SectionHeader {
                    row: row.index,
                    text: first_text(row),
                });
            }
            RowClass::Footer => {
                self.flush();
                self.emit(Block::Footer {
                    row: row.index,
                    text: first_text(row),
                });
            }
            RowClass::TableRow => {
                if !matches!(self.open, Open::Table(_)) {
                    self.flush();
                    self.open = Open::Table(Vec::new());
                }
                if let Open::Table(rows) = &mut self.open {
                    rows.push(row.clone());
                }
            }
            RowClass::Paragraph => {
                if !matches!(self.open, Open::Paragraph { .. }) {
                    self.flush();
                    self.open = Open::Paragraph {
                        span: RowSpan::single(row.index),
                        lines: Vec::new(),
                    };
                }
                if let Open::Paragraph { span, lines } = &mut self.open {
                    span.last = row.index;
                    lines.push(row.text());
                }
            }
        }
        self
    }

    /// Flush whatever is still open and return the blocks in row order
    pub fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }

    fn flush(&mut self) {
        match mem::take(&mut self.open) {
            Open::None => {}
            Open::Table(rows) => self.emit(Block::Table { rows }),
            Open::Paragraph { span, lines } => self.emit(Block::Paragraph { span, lines }),
        }
    }

    fn emit(&mut self, block: Block) {
        tracing::debug!(
            "Block {} rows {}..={}",
            block.kind(),
            block.span().first,
            block.span().last
        );
        self.blocks.push(block);
    }
}

/// Fold a sequence of classified rows into blocks
pub fn accumulate<'a, I>(rows: I) -> Vec<Block>
where
    I: IntoIterator<Item = ClassifiedRow<'a>>,
{
    rows.into_iter()
        .fold(BlockAccumulator::new(), |acc, r| acc.push(r.row, r.class))
        .finish()
}

fn first_text(row: &Row) -> String {
    row.first_non_empty()
        .map(|c| c.text().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use duke_layout_core::{Grid, Worksheet};
    use pretty_assertions::assert_eq;

    fn rows(texts: &[&str]) -> Grid {
        let mut ws = Worksheet::new("Rows");
        for (i, text) in texts.iter().enumerate() {
            ws.set_cell_value_at(i as u32 + 1, 1, *text).unwrap();
        }
        Grid::build(&ws).unwrap()
    }

    fn run(grid: &Grid, classes: &[RowClass]) -> Vec<Block> {
        accumulate(
            grid.rows()
                .iter()
                .zip(classes)
                .map(|(row, &class)| ClassifiedRow { row, class }),
        )
    }

    #[test]
    fn test_single_row_blocks() {
        let grid = rows(&["Title", "DIMENSIONS", "Disclaimer"]);
        let blocks = run(
            &grid,
            &[RowClass::Title, RowClass::SectionHeader, RowClass::Footer],
        );

        assert_eq!(
            blocks,
            vec![
                Block::Title {
                    row: 1,
                    text: "Title".to_string()
                },
                Block::SectionHeader {
                    row: 2,
                    text: "DIMENSIONS".to_string()
                },
                Block::Footer {
                    row: 3,
                    text: "Disclaimer".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_paragraph_lines_accumulate() {
        let grid = rows(&["first line", "second line", "", "third line"]);
        let blocks = run(
            &grid,
            &[
                RowClass::Paragraph,
                RowClass::Paragraph,
                RowClass::Empty,
                RowClass::Paragraph,
            ],
        );

        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            Block::Paragraph {
                span: RowSpan { first: 1, last: 2 },
                lines: vec!["first line".to_string(), "second line".to_string()],
            }
        );
        assert_eq!(blocks[1].span(), RowSpan::single(4));
    }

    #[test]
    fn test_empty_row_splits_tables() {
        let grid = rows(&["a", "b", "", "c"]);
        let blocks = run(
            &grid,
            &[
                RowClass::TableRow,
                RowClass::TableRow,
                RowClass::Empty,
                RowClass::TableRow,
            ],
        );

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].row_indices(), vec![1, 2]);
        assert_eq!(blocks[1].row_indices(), vec![4]);
    }

    #[test]
    fn test_kind_change_flushes() {
        let grid = rows(&["a", "prose", "b", "HEADER", "c"]);
        let blocks = run(
            &grid,
            &[
                RowClass::TableRow,
                RowClass::Paragraph,
                RowClass::TableRow,
                RowClass::SectionHeader,
                RowClass::TableRow,
            ],
        );

        let kinds: Vec<&str> = blocks.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            vec!["table", "paragraph", "table", "section_header", "table"]
        );
    }

    #[test]
    fn test_no_rows() {
        assert!(BlockAccumulator::new().finish().is_empty());
    }
}
