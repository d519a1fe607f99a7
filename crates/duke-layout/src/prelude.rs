//! Prelude module - common imports for duke-layout users
//!
//! ```rust
//! use duke_layout::prelude::*;
//! ```

pub use crate::{
    // Pipeline
    infer_blocks,
    run_job,
    Block,
    CellAddress,
    CellRange,
    CellValue,
    ConvertOptions,
    Converter,
    // Errors
    Error,
    ErrorKind,
    Grid,
    HtmlRenderer,
    // Status sinks
    JobStatus,
    JsonStatusFile,
    Lexicon,
    LogStatus,
    OutputFormat,
    Result,
    RowClass,
    RowClassifier,
    SheetDocument,
    SqlExporter,
    Style,
    Worksheet,
};
