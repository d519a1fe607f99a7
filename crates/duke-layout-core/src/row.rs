//! Row and cell types of a built [`Grid`](crate::Grid)

use crate::cell::{CellAddress, CellValue};
use crate::merge::{MergeRef, MergeRole};
use crate::style::{HorizontalAlignment, Style};

/// A cell of the read-only grid
///
/// `value` is already resolved: a coordinate covered by a merge range (but
/// not its owner) carries the owner's value.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Coordinate (1-based)
    pub address: CellAddress,
    /// Resolved value
    pub value: CellValue,
    /// Style flags of this coordinate
    pub style: Style,
    /// Merge membership, if the coordinate is part of a merge range
    pub merge: Option<MergeRef>,
    /// Rows spanned (> 1 only for merge owners)
    pub rowspan: u32,
    /// Columns spanned (> 1 only for merge owners)
    pub colspan: u16,
}

impl Cell {
    /// Create an unmerged cell
    pub fn new(address: CellAddress, value: CellValue, style: Style) -> Self {
        Self {
            address,
            value,
            style,
            merge: None,
            rowspan: 1,
            colspan: 1,
        }
    }

    /// Row index
    pub fn row(&self) -> u32 {
        self.address.row
    }

    /// Column index
    pub fn col(&self) -> u16 {
        self.address.col
    }

    /// Last column occupied by this cell, accounting for its span
    pub fn last_col(&self) -> u16 {
        self.address.col + self.colspan - 1
    }

    /// Display text of the resolved value
    pub fn text(&self) -> String {
        self.value.to_string()
    }

    /// Check if the resolved value is empty or whitespace
    pub fn is_empty(&self) -> bool {
        self.value.is_blank()
    }

    /// Check if this coordinate is a non-owner member of a merge range
    pub fn is_covered(&self) -> bool {
        matches!(self.merge, Some(m) if m.role == MergeRole::Covered)
    }

    /// Check if this coordinate owns a merge range
    pub fn is_merge_owner(&self) -> bool {
        matches!(self.merge, Some(m) if m.role == MergeRole::Owner)
    }

    /// Check if the cell spans more than one row or column
    pub fn is_spanning(&self) -> bool {
        self.rowspan > 1 || self.colspan > 1
    }

    /// Bold font
    pub fn is_bold(&self) -> bool {
        self.style.bold
    }

    /// Any visible border edge
    pub fn has_border(&self) -> bool {
        self.style.has_border()
    }

    /// Horizontal alignment
    pub fn alignment(&self) -> HorizontalAlignment {
        self.style.horizontal
    }
}

/// One grid row with a cell for every column in the grid's column range
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Row index (1-based)
    pub index: u32,
    /// Cells in column order
    cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells in column order
    pub fn new(index: u32, cells: Vec<Cell>) -> Self {
        Self { index, cells }
    }

    /// All cells, including empty and merge-covered ones
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get a cell by column index
    pub fn cell(&self, col: u16) -> Option<&Cell> {
        self.cells.iter().find(|c| c.col() == col)
    }

    /// Number of columns in the row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Cells that are not covered by another cell's merge range
    pub fn visible_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| !c.is_covered())
    }

    /// Non-empty cells, merge-covered non-owner cells excluded
    pub fn non_empty_cells(&self) -> impl Iterator<Item = &Cell> {
        self.visible_cells().filter(|c| !c.is_empty())
    }

    /// First non-empty visible cell
    pub fn first_non_empty(&self) -> Option<&Cell> {
        self.non_empty_cells().next()
    }

    /// Check if the row has no visible content
    pub fn is_empty(&self) -> bool {
        self.first_non_empty().is_none()
    }

    /// Highest column occupied by a non-empty cell, accounting for spans
    ///
    /// Merge-covered cells count too, so a column held by a rowspan from an
    /// earlier row still widens the row. Returns 0 for an empty row.
    pub fn last_data_column(&self) -> u16 {
        self.cells
            .iter()
            .filter(|c| !c.is_empty())
            .map(Cell::last_col)
            .max()
            .unwrap_or(0)
    }

    /// Non-empty visible cell texts joined by a single space
    pub fn text(&self) -> String {
        self.non_empty_cells()
            .map(|c| c.text())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}
