//! Merge ranges and the coordinate → owner index
//!
//! Merge ranges are stored once in an arena ([`MergeIndex::ranges`]) and every
//! covered coordinate maps to the [`MergeId`] of its range. The index is built
//! a single time when the grid is built and is read-only afterwards.

use ahash::AHashMap;

use crate::cell::{CellAddress, CellRange};
use crate::error::{Error, Result};
use crate::MAX_ROWS;

/// Identifier of a merge range inside a [`MergeIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MergeId(pub usize);

/// A rectangular group of cells sharing the value of its top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeRange {
    /// Owner coordinate
    pub top_left: CellAddress,
    /// Number of rows covered (>= 1)
    pub row_span: u32,
    /// Number of columns covered (>= 1)
    pub col_span: u16,
}

impl MergeRange {
    /// Create a merge range from its owner and spans
    pub fn new(top_left: CellAddress, row_span: u32, col_span: u16) -> Result<Self> {
        if row_span == 0 || col_span == 0 {
            return Err(Error::DegenerateMerge {
                origin: top_left.to_string(),
                rows: row_span,
                cols: col_span as u32,
            });
        }
        if top_left.row == 0 || top_left.col == 0 {
            return Err(Error::InvalidAddress(format!(
                "merge origin R{}C{} is not 1-based",
                top_left.row, top_left.col
            )));
        }
        let last_row = top_left.row as u64 + row_span as u64 - 1;
        if last_row > MAX_ROWS as u64 {
            return Err(Error::RowOutOfBounds(
                last_row.min(u32::MAX as u64) as u32,
                MAX_ROWS,
            ));
        }
        let last_col = top_left.col as u32 + col_span as u32 - 1;
        if last_col > crate::MAX_COLS as u32 {
            return Err(Error::ColumnOutOfBounds(last_col, crate::MAX_COLS));
        }
        Ok(Self {
            top_left,
            row_span,
            col_span,
        })
    }

    /// Create a merge range covering an A1-style range
    pub fn from_range(range: &CellRange) -> Result<Self> {
        Self::new(range.start, range.row_count(), range.col_count())
    }

    /// The covered area as a [`CellRange`]
    pub fn range(&self) -> CellRange {
        CellRange::from_indices(
            self.top_left.row,
            self.top_left.col,
            self.last_row(),
            self.last_col(),
        )
    }

    /// Last covered row
    pub fn last_row(&self) -> u32 {
        self.top_left.row + self.row_span - 1
    }

    /// Last covered column
    pub fn last_col(&self) -> u16 {
        self.top_left.col + self.col_span - 1
    }

    /// Check if a coordinate is covered by this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        self.range().contains(addr)
    }
}

/// How a coordinate participates in a merge range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeRole {
    /// Top-left coordinate; carries the value and the spans
    Owner,
    /// Any other coordinate of the range; resolves to the owner's value
    Covered,
}

/// Merge membership of a single coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeRef {
    /// Range this coordinate belongs to
    pub id: MergeId,
    /// Owner coordinate of that range
    pub owner: CellAddress,
    /// Role of the coordinate
    pub role: MergeRole,
}

/// Arena of merge ranges plus a coordinate → range index
#[derive(Debug, Default, Clone)]
pub struct MergeIndex {
    ranges: Vec<MergeRange>,
    coords: AHashMap<CellAddress, MergeId>,
}

impl MergeIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index, rejecting overlapping ranges
    pub fn build<I>(ranges: I) -> Result<Self>
    where
        I: IntoIterator<Item = MergeRange>,
    {
        let mut index = Self::new();
        for range in ranges {
            index.insert(range)?;
        }
        Ok(index)
    }

    /// Add a range to the index
    ///
    /// The index is left untouched when the range is degenerate, out of
    /// bounds or overlaps an existing one. Ranges built as struct literals
    /// are checked the same way [`MergeRange::new`] checks them.
    pub fn insert(&mut self, range: MergeRange) -> Result<MergeId> {
        let range = MergeRange::new(range.top_left, range.row_span, range.col_span)?;
        let area = range.range();
        if let Some(existing) = self.ranges.iter().find(|r| r.range().overlaps(&area)) {
            return Err(Error::merge_conflict(area, existing.range()));
        }

        let id = MergeId(self.ranges.len());
        self.ranges.push(range);
        self.coords.extend(area.cells().map(|addr| (addr, id)));
        Ok(id)
    }

    /// All merge ranges in insertion order
    pub fn ranges(&self) -> &[MergeRange] {
        &self.ranges
    }

    /// Get a range by id
    pub fn get(&self, id: MergeId) -> Option<&MergeRange> {
        self.ranges.get(id.0)
    }

    /// Number of merge ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if there are no merge ranges
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Merge membership of a coordinate, if any
    pub fn lookup(&self, addr: &CellAddress) -> Option<MergeRef> {
        let id = *self.coords.get(addr)?;
        let owner = self.ranges[id.0].top_left;
        let role = if owner == *addr {
            MergeRole::Owner
        } else {
            MergeRole::Covered
        };
        Some(MergeRef { id, owner, role })
    }

    /// Owner coordinate a coordinate resolves to (itself when unmerged)
    pub fn resolve(&self, addr: &CellAddress) -> CellAddress {
        self.lookup(addr).map(|m| m.owner).unwrap_or(*addr)
    }

    /// Check if a coordinate is a non-owner member of a range
    pub fn is_covered(&self, addr: &CellAddress) -> bool {
        matches!(
            self.lookup(addr),
            Some(MergeRef {
                role: MergeRole::Covered,
                ..
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn merge(s: &str) -> MergeRange {
        MergeRange::from_range(&CellRange::parse(s).unwrap()).unwrap()
    }

    #[test]
    fn test_merge_spans() {
        let m = merge("B2:D4");
        assert_eq!(m.top_left, CellAddress::new(2, 2));
        assert_eq!(m.row_span, 3);
        assert_eq!(m.col_span, 3);
        assert_eq!(m.last_row(), 4);
        assert_eq!(m.last_col(), 4);
    }

    #[test]
    fn test_degenerate_merge_rejected() {
        assert!(matches!(
            MergeRange::new(CellAddress::new(1, 1), 0, 2),
            Err(Error::DegenerateMerge { .. })
        ));
        assert!(MergeRange::new(CellAddress::new(0, 1), 1, 1).is_err());
    }

    #[test]
    fn test_lookup_roles() {
        let index = MergeIndex::build([merge("A2:A4")]).unwrap();

        let owner = index.lookup(&CellAddress::new(2, 1)).unwrap();
        assert_eq!(owner.role, MergeRole::Owner);

        let covered = index.lookup(&CellAddress::new(4, 1)).unwrap();
        assert_eq!(covered.role, MergeRole::Covered);
        assert_eq!(covered.owner, CellAddress::new(2, 1));

        assert!(index.lookup(&CellAddress::new(5, 1)).is_none());
        assert_eq!(
            index.resolve(&CellAddress::new(3, 1)),
            CellAddress::new(2, 1)
        );
        assert_eq!(
            index.resolve(&CellAddress::new(3, 2)),
            CellAddress::new(3, 2)
        );
    }

    #[test]
    fn test_index_rejects_unchecked_ranges() {
        let zero_wide = MergeRange {
            top_left: CellAddress::new(1, 1),
            row_span: 1,
            col_span: 0,
        };
        assert!(matches!(
            MergeIndex::build([zero_wide]),
            Err(Error::DegenerateMerge { .. })
        ));

        let too_tall = MergeRange {
            top_left: CellAddress::new(MAX_ROWS, 1),
            row_span: 2,
            col_span: 1,
        };
        let mut index = MergeIndex::build([merge("A1:B2")]).unwrap();
        assert!(matches!(
            index.insert(too_tall),
            Err(Error::RowOutOfBounds(..))
        ));
        assert_eq!(index.len(), 1);
        assert!(index.lookup(&CellAddress::new(MAX_ROWS, 1)).is_none());
    }

    #[test]
    fn test_overlap_rejected() {
        let err = MergeIndex::build([merge("A1:C3"), merge("C3:D4")]).unwrap_err();
        assert!(matches!(err, Error::MergedCellConflict { .. }));

        // Adjacent ranges are fine
        let index = MergeIndex::build([merge("A1:C3"), merge("D1:D3")]).unwrap();
        assert_eq!(index.len(), 2);
    }
}
