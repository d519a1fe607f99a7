//! Conversion options

use std::fmt;
use std::str::FromStr;

use duke_layout_core::GridOptions;
use duke_layout_csv::CsvReadOptions;
use duke_layout_engine::Lexicon;
use duke_layout_render::{ExportOptions, RenderOptions};

/// Output produced by a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// HTML document
    #[default]
    Html,
    /// SQL script for one section
    Sql,
}

impl OutputFormat {
    /// Usual file extension
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Sql => "sql",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(OutputFormat::Html),
            "sql" => Ok(OutputFormat::Sql),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Everything a conversion can be configured with
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Output format
    pub format: OutputFormat,
    /// Job identifier; also used in exported table names
    pub job_id: u64,
    /// Grid building limits
    pub grid: GridOptions,
    /// Classification vocabularies
    pub lexicon: Lexicon,
    /// HTML options
    pub render: RenderOptions,
    /// SQL options; the job id is taken from [`ConvertOptions::job_id`]
    pub export: ExportOptions,
    /// CSV input options
    pub csv: CsvReadOptions,
}

impl ConvertOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the job identifier
    pub fn with_job_id(mut self, job_id: u64) -> Self {
        self.job_id = job_id;
        self
    }

    /// Set the section exported as SQL
    pub fn with_section<S: Into<String>>(mut self, section: S) -> Self {
        self.export.section = section.into();
        self
    }

    /// Replace the lexicon
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Export options with the job id applied
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            job_id: self.job_id,
            ..self.export.clone()
        }
    }
}
