//! Top-level error taxonomy
//!
//! Every failure of a conversion falls into one [`ErrorKind`]:
//! - `Input`: the source is missing, empty, unreadable or malformed
//! - `Structure`: the sheet cannot form a consistent grid
//! - `Render`: the target section is missing or nothing could be rendered
//! - `Output`: the result cannot be written

use std::fmt;
use std::path::PathBuf;

use duke_layout_csv::CsvError;
use duke_layout_engine::EngineError;
use duke_layout_render::RenderError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Problems with the conversion input
#[derive(Debug, Error)]
pub enum InputError {
    /// Input file does not exist
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),

    /// Input file has no content
    #[error("Input file is empty: {0}")]
    Empty(PathBuf),

    /// Input file extension is not supported
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(PathBuf),

    /// IO error while reading input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(CsvError),

    /// Malformed JSON document or lexicon
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed JSON that does not describe a sheet
    #[error("Invalid sheet document: {0}")]
    InvalidDocument(String),

    /// Unusable classification lexicon
    #[error("Invalid lexicon: {0}")]
    Lexicon(#[from] EngineError),
}

/// Errors that can occur during a conversion
#[derive(Debug, Error)]
pub enum Error {
    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Structure error
    #[error(transparent)]
    Structure(#[from] duke_layout_core::Error),

    /// Render error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Output could not be persisted
    #[error("Failed to write output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<CsvError> for Error {
    fn from(err: CsvError) -> Self {
        match err {
            CsvError::Core(e) => Error::Structure(e),
            other => Error::Input(InputError::Csv(other)),
        }
    }
}

impl Error {
    /// Category of the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Input(_) => ErrorKind::Input,
            Error::Structure(_) => ErrorKind::Structure,
            Error::Render(_) => ErrorKind::Render,
            Error::Output { .. } => ErrorKind::Output,
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Output {
            path: path.into(),
            source,
        }
    }
}

/// Error categories reported to job status sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Input,
    Structure,
    Render,
    Output,
}

impl ErrorKind {
    /// Name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Input => "InputError",
            ErrorKind::Structure => "StructureError",
            ErrorKind::Render => "RenderError",
            ErrorKind::Output => "OutputError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let err: Error = InputError::Empty(PathBuf::from("a.json")).into();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(err.to_string(), "Input file is empty: a.json");

        let err: Error = RenderError::SectionNotFound("DIMENSIONS".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Render);

        let err: Error = CsvError::Core(duke_layout_core::Error::InvalidRange("x".into())).into();
        assert_eq!(err.kind(), ErrorKind::Structure);

        assert_eq!(ErrorKind::Output.to_string(), "OutputError");
    }
}
