//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The calculated value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`CellData`] - Staged cell data (value and style)

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::{CellError, CellValue};

use crate::style::Style;

/// Complete data for a single staged cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    /// The cell's calculated value
    pub value: CellValue,
    /// The cell's style flags
    pub style: Style,
}

impl CellData {
    /// Create a new cell with a value and default style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style: Style::default(),
        }
    }

    /// Create a new cell with a value and style
    pub fn with_style(value: CellValue, style: Style) -> Self {
        Self { value, style }
    }
}
