//! Loading sheets and lexicons from disk

use std::fs;
use std::path::Path;

use duke_layout_core::Worksheet;
use duke_layout_csv::CsvReader;
use duke_layout_engine::Lexicon;

use crate::document::SheetDocument;
use crate::error::{InputError, Result};
use crate::options::ConvertOptions;

/// Load the staging worksheet for `path`
///
/// The format follows the extension: `.json` sheet documents, `.csv` and
/// `.tsv`. CSV sheets are titled after the file stem.
pub fn load_worksheet<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<Worksheet> {
    let path = path.as_ref();
    check_input(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let sheet = match extension.as_deref() {
        Some("json") => {
            let json = fs::read_to_string(path).map_err(InputError::Io)?;
            SheetDocument::from_json(&json)?.into_worksheet()?
        }
        Some(ext @ ("csv" | "tsv")) => {
            let mut csv = options.csv.clone();
            if ext == "tsv" {
                csv.delimiter = b'\t';
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                csv.sheet_title = stem.to_string();
            }
            CsvReader::read_file(path, &csv)?
        }
        _ => return Err(InputError::UnsupportedFormat(path.to_path_buf()).into()),
    };

    tracing::info!(
        "Loaded '{}' from {}: {} cells",
        sheet.title(),
        path.display(),
        sheet.cell_count()
    );
    Ok(sheet)
}

/// Load a classification lexicon from a JSON file
///
/// Missing fields keep their default values.
pub fn load_lexicon<P: AsRef<Path>>(path: P) -> Result<Lexicon> {
    let path = path.as_ref();
    check_input(path)?;
    let json = fs::read_to_string(path).map_err(InputError::Io)?;
    let lexicon: Lexicon = serde_json::from_str(&json).map_err(InputError::Json)?;
    lexicon.validate().map_err(InputError::Lexicon)?;
    Ok(lexicon)
}

fn check_input(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(InputError::NotFound(path.to_path_buf()).into());
    }
    let metadata = fs::metadata(path).map_err(InputError::Io)?;
    if metadata.len() == 0 {
        return Err(InputError::Empty(path.to_path_buf()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use duke_layout_core::CellValue;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_csv_uses_stem_as_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "nyy.csv", "Size,Weight\n16,320\n");

        let sheet = load_worksheet(&path, &ConvertOptions::default()).unwrap();
        assert_eq!(sheet.title(), "nyy");
        assert_eq!(sheet.get_value_at(2, 2), CellValue::Number(320.0));
    }

    #[test]
    fn test_load_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "data.tsv", "a\tb\n");

        let sheet = load_worksheet(&path, &ConvertOptions::default()).unwrap();
        assert_eq!(sheet.get_value_at(1, 2), CellValue::string("b"));
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "sheet.json",
            r#"{"title": "NYY", "cells": [{"ref": "B2", "value": "x"}]}"#,
        );

        let sheet = load_worksheet(&path, &ConvertOptions::default()).unwrap();
        assert_eq!(sheet.title(), "NYY");
        assert_eq!(sheet.get_value_at(2, 2), CellValue::string("x"));
    }

    #[test]
    fn test_input_errors() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConvertOptions::default();

        let err = load_worksheet(dir.path().join("missing.csv"), &options).unwrap_err();
        assert!(matches!(err, Error::Input(InputError::NotFound(_))));

        let empty = write(&dir, "empty.csv", "");
        let err = load_worksheet(&empty, &options).unwrap_err();
        assert!(matches!(err, Error::Input(InputError::Empty(_))));

        let xlsx = write(&dir, "book.xlsx", "PK");
        let err = load_worksheet(&xlsx, &options).unwrap_err();
        assert!(matches!(err, Error::Input(InputError::UnsupportedFormat(_))));

        let bad = write(&dir, "bad.json", "{ not json");
        assert_eq!(load_worksheet(&bad, &options).unwrap_err().kind(), ErrorKind::Input);
    }

    #[test]
    fn test_load_lexicon() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "lexicon.json", r#"{"section_headers": ["RATINGS"]}"#);

        let lexicon = load_lexicon(&path).unwrap();
        assert_eq!(lexicon.section_headers, vec!["RATINGS".to_string()]);
        assert_eq!(lexicon.title_window, Lexicon::default().title_window);

        let bad = write(&dir, "bad.json", r#"{"section_max_words": 0}"#);
        let err = load_lexicon(&bad).unwrap_err();
        assert!(matches!(err, Error::Input(InputError::Lexicon(_))));
    }
}
