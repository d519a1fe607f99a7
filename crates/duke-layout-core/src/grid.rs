//! The read-only grid handed to layout inference

use crate::cell::{CellAddress, CellValue};
use crate::error::Result;
use crate::merge::{MergeIndex, MergeRole};
use crate::row::{Cell, Row};
use crate::worksheet::Worksheet;

/// Default limit on the number of columns read from a sheet
pub const DEFAULT_MAX_COLUMNS: u16 = 150;

/// Options for building a [`Grid`]
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Maximum number of columns kept, counted from the sheet's first column
    pub max_columns: u16,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

/// A fully materialized sheet: contiguous rows, resolved merge values
///
/// Rows run from 1 to the last used row with no gaps; every row holds one
/// [`Cell`] per column in `min_column..=max_column`.
#[derive(Debug, Clone)]
pub struct Grid {
    title: String,
    rows: Vec<Row>,
    merges: MergeIndex,
    min_column: u16,
    max_column: u16,
}

impl Grid {
    /// Build a grid with default options
    pub fn build(sheet: &Worksheet) -> Result<Self> {
        Self::build_with_options(sheet, &GridOptions::default())
    }

    /// Build a grid from a worksheet
    ///
    /// Fails when merge ranges overlap or are degenerate.
    pub fn build_with_options(sheet: &Worksheet, options: &GridOptions) -> Result<Self> {
        let merges = MergeIndex::build(sheet.merged_regions().iter().copied())?;

        let Some(used) = sheet.used_range() else {
            tracing::info!("Sheet '{}' is empty", sheet.title());
            return Ok(Self {
                title: sheet.title().to_string(),
                rows: Vec::new(),
                merges,
                min_column: 1,
                max_column: 0,
            });
        };

        let min_column = used.start.col;
        let mut max_column = used.end.col;
        let limit = options.max_columns.max(1);
        if used.col_count() > limit {
            max_column = min_column + limit - 1;
            tracing::warn!(
                "Limiting sheet '{}' to {} columns (detected {})",
                sheet.title(),
                limit,
                used.col_count()
            );
        }

        let rows = (1..=used.end.row)
            .map(|row| {
                let cells = (min_column..=max_column)
                    .map(|col| Self::resolve_cell(sheet, &merges, CellAddress::new(row, col)))
                    .collect();
                Row::new(row, cells)
            })
            .collect::<Vec<_>>();

        tracing::info!(
            "Built grid '{}': {} rows, columns {}..={}, {} merge ranges",
            sheet.title(),
            rows.len(),
            min_column,
            max_column,
            merges.len()
        );

        Ok(Self {
            title: sheet.title().to_string(),
            rows,
            merges,
            min_column,
            max_column,
        })
    }

    fn resolve_cell(sheet: &Worksheet, merges: &MergeIndex, address: CellAddress) -> Cell {
        let own = sheet.cell_at(address.row, address.col);
        let style = own.map(|c| c.style).unwrap_or_default();

        let Some(merge) = merges.lookup(&address) else {
            let value = own.map(|c| c.value.clone()).unwrap_or_default();
            return Cell::new(address, value, style);
        };

        match merge.role {
            MergeRole::Owner => {
                let range = merges.ranges()[merge.id.0];
                Cell {
                    address,
                    value: own.map(|c| c.value.clone()).unwrap_or_default(),
                    style,
                    merge: Some(merge),
                    rowspan: range.row_span,
                    colspan: range.col_span,
                }
            }
            MergeRole::Covered => Cell {
                address,
                value: sheet.get_value_at(merge.owner.row, merge.owner.col),
                style,
                merge: Some(merge),
                rowspan: 1,
                colspan: 1,
            },
        }
    }

    /// Sheet title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All rows in order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by 1-based index
    pub fn row(&self, index: u32) -> Option<&Row> {
        index
            .checked_sub(1)
            .and_then(|i| self.rows.get(i as usize))
    }

    /// Number of rows (equal to the last row index)
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// First column present in every row
    pub fn min_column(&self) -> u16 {
        self.min_column
    }

    /// Last column present in every row
    pub fn max_column(&self) -> u16 {
        self.max_column
    }

    /// Number of columns per row
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Row::len).unwrap_or(0)
    }

    /// The merge range index
    pub fn merges(&self) -> &MergeIndex {
        &self.merges
    }

    /// Get a cell by coordinate
    pub fn cell(&self, address: &CellAddress) -> Option<&Cell> {
        if address.col < self.min_column || address.col > self.max_column {
            return None;
        }
        self.row(address.row)?
            .cells()
            .get((address.col - self.min_column) as usize)
    }

    /// Value a coordinate resolves to
    ///
    /// A non-owner member of a merge range yields the owner's value; any other
    /// coordinate yields its own value. Coordinates outside the grid yield
    /// `None`.
    pub fn resolve(&self, address: &CellAddress) -> Option<&CellValue> {
        let owner = self.merges.resolve(address);
        self.cell(address)?;
        self.cell(&owner).map(|c| &c.value)
    }
}
