//! CSV options

/// Options for reading CSV files
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Title of the resulting sheet
    pub sheet_title: String,
    /// Turn numeric and TRUE/FALSE fields into numbers and booleans
    pub auto_detect_types: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            sheet_title: "Sheet1".to_string(),
            auto_detect_types: true,
        }
    }
}

impl CsvReadOptions {
    /// Use another delimiter, e.g. `b';'` or `b'\t'`
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the sheet title
    pub fn with_sheet_title<S: Into<String>>(mut self, title: S) -> Self {
        self.sheet_title = title.into();
        self
    }
}
