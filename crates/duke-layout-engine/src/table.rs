//! Table reconstruction
//!
//! [`TableBuilder`] turns the rows of one table block into a
//! [`TableStructure`]: a header section and a body section of rendered rows,
//! each cell carrying its effective colspan and rowspan.
//!
//! Coordinates hidden by a rowspan from an earlier row are tracked in a
//! [`Coverage`] set. The header and the body each get their own set, passed
//! into and returned from the section builders, so a span in the header
//! never hides body cells.

use ahash::AHashSet;
use duke_layout_core::{Cell, CellAddress, HorizontalAlignment, Row};

/// Header rows are found among the first rows by bold text or spans
const SPANNING_HEADER_ROWS: usize = 3;

/// Role of a rendered cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Column header
    Header,
    /// First cell of a body row
    RowHeader,
    /// Plain data cell
    Data,
}

/// A cell as it appears in the reconstructed table
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub address: CellAddress,
    pub kind: CellKind,
    pub text: String,
    pub colspan: u16,
    pub rowspan: u32,
    pub align: HorizontalAlignment,
}

impl TableCell {
    fn from_cell(cell: &Cell, kind: CellKind) -> Self {
        Self {
            address: cell.address,
            kind,
            text: cell.text(),
            colspan: cell.colspan,
            rowspan: cell.rowspan,
            align: cell.alignment(),
        }
    }

    /// Check if the cell holds no visible text
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Source row index
    pub index: u32,
    pub cells: Vec<TableCell>,
}

/// Header and body of a reconstructed table
#[derive(Debug, Clone, PartialEq)]
pub struct TableStructure {
    pub header: Vec<TableRow>,
    pub body: Vec<TableRow>,
    /// Highest column occupied by any row, spans included
    pub max_column: u16,
}

impl TableStructure {
    /// Total number of rendered rows
    pub fn row_count(&self) -> usize {
        self.header.len() + self.body.len()
    }

    /// Header rows followed by body rows
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.header.iter().chain(self.body.iter())
    }
}

/// Coordinates hidden by rowspans of earlier rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage(AHashSet<CellAddress>);

impl Coverage {
    /// Create an empty coverage set
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a coordinate is hidden
    pub fn covers(&self, address: &CellAddress) -> bool {
        self.0.contains(address)
    }

    /// Hide the coordinates below a cell that spans several rows
    pub fn register(&mut self, cell: &Cell) {
        for row in 1..cell.rowspan {
            for col in 0..cell.colspan {
                self.0.insert(CellAddress::new(
                    cell.address.row + row,
                    cell.address.col + col,
                ));
            }
        }
    }

    /// Number of hidden coordinates
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing is hidden
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Reconstructs header/body structure from the rows of a table block
pub struct TableBuilder;

impl TableBuilder {
    /// Build the structure of a table
    ///
    /// Returns `None` when no row survives reconstruction.
    pub fn build(rows: &[Row]) -> Option<TableStructure> {
        let max_column = Self::max_column(rows);
        let split = Self::header_row_count(rows);
        let (header_rows, body_rows) = rows.split_at(split);

        let (header, _) = Self::build_header(header_rows, max_column, Coverage::new());
        let (body, _) = Self::build_body(body_rows, max_column, Coverage::new());

        if header.is_empty() && body.is_empty() {
            tracing::debug!(
                "Discarding table at rows {:?}: nothing to render",
                rows.first().map(|r| r.index)
            );
            return None;
        }
        Some(TableStructure {
            header,
            body,
            max_column,
        })
    }

    /// Highest column occupied by a non-empty cell in any row
    pub fn max_column(rows: &[Row]) -> u16 {
        rows.iter().map(Row::last_data_column).max().unwrap_or(0)
    }

    /// Length of the header-row prefix
    ///
    /// Among the first rows a header row has only bold text or contains a
    /// spanning cell; after that only bold rows qualify. The scan stops at the
    /// first row that does not qualify. Rows with no visible content neither
    /// qualify nor stop the scan.
    pub fn header_row_count(rows: &[Row]) -> usize {
        let mut count = 0;
        for (i, row) in rows.iter().enumerate() {
            let cells: Vec<&Cell> = row.non_empty_cells().collect();
            if cells.is_empty() {
                continue;
            }
            let all_bold = cells.iter().all(|c| c.is_bold());
            let spanning = cells.iter().any(|c| c.is_spanning());
            let header = if i < SPANNING_HEADER_ROWS {
                all_bold || spanning
            } else {
                all_bold
            };
            if !header {
                break;
            }
            count = i + 1;
        }
        count
    }

    /// Render header rows; every cell is a header cell
    pub fn build_header(
        rows: &[Row],
        max_column: u16,
        mut coverage: Coverage,
    ) -> (Vec<TableRow>, Coverage) {
        let mut rendered = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cells = Vec::new();
            for cell in Self::emitted_cells(row, max_column, &coverage) {
                coverage.register(cell);
                cells.push(TableCell::from_cell(cell, CellKind::Header));
            }
            if !cells.is_empty() {
                rendered.push(TableRow {
                    index: row.index,
                    cells,
                });
            }
        }
        (rendered, coverage)
    }

    /// Render body rows; the first emitted cell of a row is its row header
    pub fn build_body(
        rows: &[Row],
        max_column: u16,
        mut coverage: Coverage,
    ) -> (Vec<TableRow>, Coverage) {
        let mut rendered = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cells = Vec::new();
            for cell in Self::emitted_cells(row, max_column, &coverage) {
                coverage.register(cell);
                let kind = if cells.is_empty() {
                    CellKind::RowHeader
                } else {
                    CellKind::Data
                };
                cells.push(TableCell::from_cell(cell, kind));
            }
            if !cells.is_empty() {
                rendered.push(TableRow {
                    index: row.index,
                    cells,
                });
            }
        }
        (rendered, coverage)
    }

    /// Cells that are rendered: inside the occupied columns, not covered by a
    /// merge and not hidden by an earlier rowspan
    fn emitted_cells<'r>(
        row: &'r Row,
        max_column: u16,
        coverage: &Coverage,
    ) -> Vec<&'r Cell> {
        row.cells()
            .iter()
            .filter(|c| c.col() <= max_column)
            .filter(|c| !c.is_covered() && !coverage.covers(&c.address))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duke_layout_core::{CellRange, Grid, Style, Worksheet};
    use pretty_assertions::assert_eq;

    fn texts(row: &TableRow) -> Vec<&str> {
        row.cells.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_bold_header_and_body() {
        let mut ws = Worksheet::new("Table");
        let bold = Style::new().bold(true);
        ws.set_cell("A1", "A", &bold).unwrap();
        ws.set_cell("B1", "B", &bold).unwrap();
        ws.set_cell_value("A2", "1").unwrap();
        ws.set_cell_value("B2", "2").unwrap();
        ws.set_cell_value("A3", "3").unwrap();
        ws.set_cell_value("B3", "4").unwrap();
        let grid = Grid::build(&ws).unwrap();

        let table = TableBuilder::build(grid.rows()).unwrap();
        assert_eq!(table.max_column, 2);
        assert_eq!(table.header.len(), 1);
        assert_eq!(texts(&table.header[0]), vec!["A", "B"]);
        assert!(table.header[0]
            .cells
            .iter()
            .all(|c| c.kind == CellKind::Header));

        assert_eq!(table.body.len(), 2);
        for row in &table.body {
            let kinds: Vec<CellKind> = row.cells.iter().map(|c| c.kind).collect();
            assert_eq!(kinds, vec![CellKind::RowHeader, CellKind::Data]);
        }
        assert_eq!(texts(&table.body[1]), vec!["3", "4"]);
    }

    #[test]
    fn test_vertical_merge_is_rendered_once() {
        let mut ws = Worksheet::new("Merged");
        ws.set_cell_value("A1", "X").unwrap();
        ws.set_cell_value("B1", "1").unwrap();
        ws.set_cell_value("B2", "2").unwrap();
        ws.set_cell_value("B3", "3").unwrap();
        ws.merge_cells(&CellRange::parse("A1:A3").unwrap()).unwrap();
        let grid = Grid::build(&ws).unwrap();

        // Row 1 has a spanning cell, so it opens the header
        assert_eq!(TableBuilder::header_row_count(grid.rows()), 1);

        let (body, coverage) = TableBuilder::build_body(grid.rows(), 2, Coverage::new());
        assert_eq!(texts(&body[0]), vec!["X", "1"]);
        assert_eq!(body[0].cells[0].rowspan, 3);
        assert_eq!(texts(&body[1]), vec!["2"]);
        assert_eq!(texts(&body[2]), vec!["3"]);
        // The cell next to the span becomes the row header
        assert_eq!(body[1].cells[0].kind, CellKind::RowHeader);
        assert_eq!(coverage.len(), 2);
    }

    #[test]
    fn test_header_and_body_coverage_are_independent() {
        let mut ws = Worksheet::new("Spans");
        let bold = Style::new().bold(true);
        ws.set_cell("A1", "Size", &bold).unwrap();
        ws.set_cell("B1", "Diameter", &bold).unwrap();
        ws.merge_cells(&CellRange::parse("A1:A2").unwrap()).unwrap();
        ws.set_cell("B2", "mm", &bold).unwrap();
        ws.set_cell_value("A3", "16").unwrap();
        ws.set_cell_value("B3", "9.1").unwrap();
        let grid = Grid::build(&ws).unwrap();

        let table = TableBuilder::build(grid.rows()).unwrap();
        assert_eq!(table.header.len(), 2);
        assert_eq!(texts(&table.header[0]), vec!["Size", "Diameter"]);
        assert_eq!(texts(&table.header[1]), vec!["mm"]);
        assert_eq!(texts(&table.body[0]), vec!["16", "9.1"]);
    }

    #[test]
    fn test_section_coverage_is_returned() {
        let mut ws = Worksheet::new("Spans");
        ws.set_cell_value("A1", "X").unwrap();
        ws.merge_cells(&CellRange::parse("A1:B2").unwrap()).unwrap();
        let grid = Grid::build(&ws).unwrap();

        let (_, coverage) = TableBuilder::build_header(&grid.rows()[..1], 2, Coverage::new());
        assert!(coverage.covers(&CellAddress::new(2, 1)));
        assert!(coverage.covers(&CellAddress::new(2, 2)));
        assert!(!coverage.covers(&CellAddress::new(1, 2)));
    }

    #[test]
    fn test_columns_beyond_data_are_dropped() {
        let mut ws = Worksheet::new("Wide");
        ws.set_cell_value("A1", "a").unwrap();
        ws.set_cell_value("B1", "b").unwrap();
        ws.set_cell_value("A2", "c").unwrap();
        ws.set_cell_value("D5", "far away").unwrap();
        let grid = Grid::build(&ws).unwrap();

        let table = TableBuilder::build(&grid.rows()[..2]).unwrap();
        assert_eq!(table.max_column, 2);
        // Empty cells inside the occupied columns are kept
        assert_eq!(texts(&table.body[1]), vec!["c", ""]);
    }

    #[test]
    fn test_empty_table() {
        assert!(TableBuilder::build(&[]).is_none());
    }
}
