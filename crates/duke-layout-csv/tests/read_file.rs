use std::io::Write;

use duke_layout_core::Grid;
use duke_layout_csv::{CsvError, CsvReadOptions, CsvReader};
use tempfile::NamedTempFile;

#[test]
fn read_file_into_grid() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "XLPE Cable 0.6/1kV").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "Size,Diameter,Weight").unwrap();
    writeln!(file, "16,9.1,210").unwrap();
    file.flush().unwrap();

    let ws = CsvReader::read_file(file.path(), &CsvReadOptions::default()).unwrap();
    let grid = Grid::build(&ws).unwrap();

    assert_eq!(grid.row_count(), 4);
    assert_eq!(grid.column_count(), 3);
    assert!(grid.row(2).unwrap().is_empty());
    assert_eq!(grid.row(4).unwrap().text(), "16 9.1 210");
}

#[test]
fn missing_file() {
    let err = CsvReader::read_file("/nonexistent/sheet.csv", &CsvReadOptions::default())
        .unwrap_err();
    assert!(matches!(err, CsvError::Io(_)));
}
