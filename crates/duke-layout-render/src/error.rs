//! Error types for rendering and export

use thiserror::Error;

/// Result type alias using [`RenderError`]
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while producing output from blocks
#[derive(Debug, Error)]
pub enum RenderError {
    /// No section header mentions the requested section
    #[error("Section '{0}' not found")]
    SectionNotFound(String),

    /// Nothing in the sheet produced any output
    #[error("Sheet '{0}' produced no renderable content")]
    EmptyDocument(String),
}
