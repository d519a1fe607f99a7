//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use duke_layout_core::{CellError, CellValue, Worksheet};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet
    ///
    /// Records land on 1-based rows. Blank lines are kept as empty rows since
    /// they separate blocks. Empty fields are not stored.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(options.sheet_title.clone());
        let mut row_idx = 0u32;
        // Line the next record starts on when no blank line intervenes
        let mut expected_line = 1u64;

        for result in csv_reader.records() {
            let record = result?;

            let line = record.position().map(|p| p.line()).unwrap_or(expected_line);
            let blank_lines = line.saturating_sub(expected_line) as u32;
            row_idx += 1 + blank_lines;

            let embedded_breaks: usize = record.iter().map(|f| f.matches('\n').count()).sum();
            expected_line = line + 1 + embedded_breaks as u64;

            for (col, field) in record.iter().enumerate() {
                let value = if options.auto_detect_types {
                    Self::detect_type(field)
                } else {
                    CellValue::string(field)
                };
                if value.is_blank() {
                    continue;
                }
                worksheet.set_cell_value_at(row_idx, col as u16 + 1, value)?;
            }
        }

        tracing::info!(
            "Read {} CSV rows into '{}' ({} cells)",
            row_idx,
            worksheet.title(),
            worksheet.cell_count()
        );
        Ok(worksheet)
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        match trimmed {
            "TRUE" | "true" => return CellValue::Boolean(true),
            "FALSE" | "false" => return CellValue::Boolean(false),
            _ => {}
        }
        if let Some(error) = CellError::parse(trimmed) {
            return CellValue::Error(error);
        }

        // Leading zeros are codes, not numbers
        let leading_zero = trimmed.len() > 1
            && trimmed.starts_with('0')
            && !trimmed.starts_with("0.");
        if !leading_zero {
            if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() {
                    return CellValue::Number(n);
                }
            }
        }

        CellValue::string(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn read(data: &str) -> Worksheet {
        CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap()
    }

    #[test]
    fn test_read_rows() {
        let ws = read("Size,Weight\n1.5,130\n");

        assert_eq!(ws.get_value_at(1, 1).as_string(), Some("Size"));
        assert_eq!(ws.get_value_at(2, 1), CellValue::Number(1.5));
        assert_eq!(ws.get_value_at(2, 2), CellValue::Number(130.0));
        assert_eq!(ws.cell_count(), 4);
    }

    #[test]
    fn test_blank_lines_become_empty_rows() {
        let ws = read("Title\n\nDIMENSIONS\n\"two\nlines\",x\nlast\n");

        assert_eq!(ws.get_value_at(1, 1).as_string(), Some("Title"));
        assert!(ws.get_value_at(2, 1).is_empty());
        assert_eq!(ws.get_value_at(3, 1).as_string(), Some("DIMENSIONS"));
        assert_eq!(ws.get_value_at(4, 1).as_string(), Some("two\nlines"));
        // The embedded line break does not open a gap
        assert_eq!(ws.get_value_at(5, 1).as_string(), Some("last"));
    }

    #[test]
    fn test_detect_type() {
        assert_eq!(CsvReader::detect_type("TRUE"), CellValue::Boolean(true));
        assert_eq!(CsvReader::detect_type(" 2.5 "), CellValue::Number(2.5));
        assert_eq!(CsvReader::detect_type("007"), CellValue::string("007"));
        assert_eq!(CsvReader::detect_type("0.6/1kV"), CellValue::string("0.6/1kV"));
        assert_eq!(CsvReader::detect_type(""), CellValue::Empty);
        assert_eq!(
            CsvReader::detect_type("#N/A"),
            CellValue::Error(CellError::Na)
        );
    }

    #[test]
    fn test_ragged_records_and_delimiter() {
        let options = CsvReadOptions::default()
            .with_delimiter(b';')
            .with_sheet_title("Semicolons");
        let ws = CsvReader::read("a;b;c\nd\n".as_bytes(), &options).unwrap();

        assert_eq!(ws.title(), "Semicolons");
        assert_eq!(ws.get_value_at(1, 3).as_string(), Some("c"));
        assert_eq!(ws.get_value_at(2, 1).as_string(), Some("d"));
    }
}
