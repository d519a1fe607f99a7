//! # duke-layout-core
//!
//! Core data structures for the duke-layout document structure library.
//!
//! This crate provides the grid model the layout pipeline works on:
//! - [`CellValue`] - Calculated cell values (numbers, strings, booleans, errors)
//! - [`CellAddress`] and [`CellRange`] - 1-based cell addressing and ranges
//! - [`Style`] - The style flags layout inference looks at (bold, alignment, borders)
//! - [`Worksheet`] - Mutable staging sheet filled in by readers
//! - [`Grid`] - Read-only grid with resolved merge ranges
//!
//! ## Example
//!
//! ```rust
//! use duke_layout_core::{CellAddress, CellRange, Grid, Worksheet};
//!
//! let mut sheet = Worksheet::new("Cable");
//! sheet.set_cell_value("A2", "X").unwrap();
//! sheet.merge_cells(&CellRange::parse("A2:A4").unwrap()).unwrap();
//!
//! let grid = Grid::build(&sheet).unwrap();
//! let covered = CellAddress::new(4, 1);
//! assert_eq!(grid.resolve(&covered).unwrap().to_string(), "X");
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod image;
pub mod merge;
pub mod row;
pub mod style;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellError, CellRange, CellValue};
pub use error::{Error, Result};
pub use grid::{Grid, GridOptions, DEFAULT_MAX_COLUMNS};
pub use image::ImageAnchor;
pub use merge::{MergeId, MergeIndex, MergeRange, MergeRef, MergeRole};
pub use row::{Cell, Row};
pub use style::{BorderStyle, HorizontalAlignment, Style};
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet title
pub const MAX_SHEET_TITLE_LEN: usize = 31;
