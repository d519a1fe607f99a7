//! Worksheet type
//!
//! A [`Worksheet`] is the mutable staging area a spreadsheet reader fills in:
//! calculated values, style flags, merge ranges and image anchors. Once loaded
//! it is frozen into a [`Grid`](crate::Grid) for layout inference.

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::image::ImageAnchor;
use crate::merge::MergeRange;
use crate::style::Style;
use crate::{MAX_COLS, MAX_ROWS, MAX_SHEET_TITLE_LEN};

/// A single sheet as delivered by a reader
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    /// Sheet title
    title: String,
    /// Cells keyed by (row, col), both 1-based
    cells: BTreeMap<(u32, u16), CellData>,
    /// Merge ranges in the order they were added
    merges: Vec<MergeRange>,
    /// Image anchors supplied by the image collaborator
    images: Vec<ImageAnchor>,
}

impl Worksheet {
    /// Create a new worksheet with the given title
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Get the sheet title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the sheet title
    pub fn set_title<S: Into<String>>(&mut self, title: S) -> Result<()> {
        let title = title.into();
        if title.chars().count() > MAX_SHEET_TITLE_LEN {
            return Err(Error::InvalidSheetTitle(title));
        }
        self.title = title;
        Ok(())
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by 1-based row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(&(row, col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cell_at(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by 1-based indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.entry((row, col)).or_default().value = value.into();
        Ok(())
    }

    /// Set a cell style by address string
    pub fn set_cell_style(&mut self, address: &str, style: &Style) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_style_at(addr.row, addr.col, style)
    }

    /// Set a cell style by 1-based indices
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.entry((row, col)).or_default().style = *style;
        Ok(())
    }

    /// Set value and style in one go
    pub fn set_cell(&mut self, address: &str, value: impl Into<CellValue>, style: &Style) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)?;
        self.set_cell_style_at(addr.row, addr.col, style)
    }

    /// Iterate over all stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter().map(|(&(row, col), data)| (row, col, data))
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the worksheet holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding range of all stored cells and merge ranges
    pub fn used_range(&self) -> Option<CellRange> {
        let cell_corners = self
            .cells
            .keys()
            .map(|&(row, col)| (CellAddress::new(row, col), CellAddress::new(row, col)));
        let merge_corners = self.merges.iter().map(|m| {
            let range = m.range();
            (range.start, range.end)
        });

        cell_corners
            .chain(merge_corners)
            .fold(None, |acc: Option<(CellAddress, CellAddress)>, (lo, hi)| {
                Some(match acc {
                    None => (lo, hi),
                    Some((a, b)) => (
                        CellAddress::new(a.row.min(lo.row), a.col.min(lo.col)),
                        CellAddress::new(b.row.max(hi.row), b.col.max(hi.col)),
                    ),
                })
            })
            .map(|(start, end)| CellRange::new(start, end))
    }

    // === Merged Cells ===

    /// Get merge ranges
    pub fn merged_regions(&self) -> &[MergeRange] {
        &self.merges
    }

    /// Merge cells
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        let merge = MergeRange::from_range(range)?;
        // Check for overlap with existing merged regions
        for existing in &self.merges {
            if range.overlaps(&existing.range()) {
                return Err(Error::merge_conflict(range, existing.range()));
            }
        }
        self.merges.push(merge);
        Ok(())
    }

    // === Images ===

    /// Image anchors attached to this sheet
    pub fn images(&self) -> &[ImageAnchor] {
        &self.images
    }

    /// Attach an image anchor
    pub fn add_image(&mut self, anchor: ImageAnchor) {
        self.images.push(anchor);
    }

    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }
        if col == 0 || col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS));
        }
        Ok(())
    }
}
