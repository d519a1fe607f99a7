//! Rendering and export options

/// Default URL prefix for image assets
pub const DEFAULT_ASSET_PREFIX: &str = "/storage/";

/// Default section exported as a table
pub const DEFAULT_EXPORT_SECTION: &str = "DIMENSIONS";

/// Default prefix of exported table names
pub const DEFAULT_TABLE_PREFIX: &str = "excel_import_job";

/// Longest identifier accepted by the target database
pub const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Rows per INSERT statement
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Options for HTML rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prefix prepended to every image asset reference
    pub asset_prefix: String,
    /// Document title; the sheet title is used when `None`
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            title: None,
        }
    }
}

impl RenderOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset URL prefix
    pub fn with_asset_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.asset_prefix = prefix.into();
        self
    }

    /// Override the document title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Options for SQL export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Section label to look for in section headers (case-insensitive)
    pub section: String,
    /// Table name prefix
    pub table_prefix: String,
    /// Job identifier, part of the table name
    pub job_id: u64,
    /// Maximum length of the table name
    pub max_identifier_length: usize,
    /// Rows per INSERT statement
    pub batch_size: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            section: DEFAULT_EXPORT_SECTION.to_string(),
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
            job_id: 0,
            max_identifier_length: MAX_IDENTIFIER_LENGTH,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ExportOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target section
    pub fn with_section<S: Into<String>>(mut self, section: S) -> Self {
        self.section = section.into();
        self
    }

    /// Set the job identifier
    pub fn with_job_id(mut self, job_id: u64) -> Self {
        self.job_id = job_id;
        self
    }

    /// Set the table name prefix
    pub fn with_table_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Set the number of rows per INSERT statement
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}
