//! # duke-layout-engine
//!
//! Layout inference for duke-layout: turns a [`Grid`] into an ordered list of
//! [`Block`]s and reconstructs the tables inside them.
//!
//! The pipeline is strictly forward:
//! - [`RowClassifier`] assigns every row a [`RowClass`]
//! - [`BlockAccumulator`] folds the classified rows into blocks
//! - [`TableBuilder`] splits a table block into header and body rows
//!
//! ## Example
//!
//! ```rust
//! use duke_layout_core::{Grid, Style, Worksheet};
//! use duke_layout_engine::{infer_blocks, Block, RowClassifier};
//!
//! let mut sheet = Worksheet::new("Cable");
//! sheet.set_cell("A1", "DIMENSIONS", &Style::new().bold(true)).unwrap();
//! sheet.set_cell_value("A2", "Size").unwrap();
//! sheet.set_cell_value("B2", "Weight").unwrap();
//!
//! let grid = Grid::build(&sheet).unwrap();
//! let blocks = infer_blocks(&grid, &RowClassifier::default());
//! assert!(matches!(blocks[1], Block::Table { .. }));
//! ```

pub mod accumulate;
pub mod block;
pub mod classify;
pub mod error;
pub mod lexicon;
pub mod table;

pub use accumulate::{accumulate, BlockAccumulator};
pub use block::{Block, RowSpan};
pub use classify::{ClassifiedRow, RowClass, RowClassifier, RowContext};
pub use error::{EngineError, EngineResult};
pub use lexicon::{Lexicon, DEFAULT_TITLE_PATTERN};
pub use table::{CellKind, Coverage, TableBuilder, TableCell, TableRow, TableStructure};

use duke_layout_core::Grid;

/// Classify the rows of a grid and group them into blocks
pub fn infer_blocks(grid: &Grid, classifier: &RowClassifier) -> Vec<Block> {
    let blocks = accumulate(classifier.classify_grid(grid));
    tracing::info!(
        "Inferred {} blocks from {} rows of '{}'",
        blocks.len(),
        grid.row_count(),
        grid.title()
    );
    blocks
}
