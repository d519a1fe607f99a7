//! Engine error types
//!
//! Classification itself never fails; only building a classifier from a
//! user-supplied lexicon can.

use thiserror::Error;

/// Result type for engine setup
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while preparing the layout engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// The title pattern of a lexicon is not a valid regular expression
    #[error("Invalid title pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A lexicon threshold is out of range
    #[error("Invalid lexicon setting {name}: {message}")]
    InvalidSetting { name: &'static str, message: String },
}
