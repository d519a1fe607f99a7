//! Error types for duke-layout-core
//!
//! Everything in here is a structure error: the sheet handed to the layout
//! pipeline cannot be turned into a consistent grid.

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a grid
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Invalid sheet title
    #[error("Invalid sheet title: {0}")]
    InvalidSheetTitle(String),

    /// Unknown style attribute value
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    /// Merge range with a zero row or column span
    #[error("Merge range at {origin} must span at least one row and column (got {rows}x{cols})")]
    DegenerateMerge {
        origin: String,
        rows: u32,
        cols: u32,
    },

    /// Merge range overlapping an existing one
    #[error("Merge range {range} overlaps existing merge range {existing}")]
    MergedCellConflict { range: String, existing: String },
}

impl Error {
    /// Create a merge conflict error from the two offending ranges
    pub fn merge_conflict(range: impl ToString, existing: impl ToString) -> Self {
        Error::MergedCellConflict {
            range: range.to_string(),
            existing: existing.to_string(),
        }
    }
}
