//! # duke-layout
//!
//! Infer the document structure of a spreadsheet (titles, section headers,
//! tables, paragraphs, footers) and render it as an HTML document or export
//! one section as SQL.
//!
//! ## Features
//!
//! - Merge-aware grid model
//! - Row classification driven by a configurable [`Lexicon`]
//! - Table reconstruction with multi-row headers and merged cells
//! - HTML rendering with image placement
//! - SQL export of a named section
//! - JSON sheet documents and CSV input
//!
//! ## Example
//!
//! ```rust
//! use duke_layout::prelude::*;
//!
//! let mut sheet = Worksheet::new("NYY");
//! sheet.set_cell_value("A1", "DIMENSIONS").unwrap();
//! sheet.merge_cells(&CellRange::parse("A1:C1").unwrap()).unwrap();
//! sheet.set_cell_value("A2", "Size").unwrap();
//! sheet.set_cell_value("B2", "Weight").unwrap();
//! sheet.set_cell_value("A3", "16").unwrap();
//! sheet.set_cell_value("B3", "320").unwrap();
//!
//! let converter = Converter::default();
//! let blocks = converter.blocks(&sheet).unwrap();
//! assert_eq!(blocks.len(), 2);
//!
//! let html = converter.to_html(&sheet).unwrap();
//! assert!(html.contains("section-header"));
//! ```

pub mod convert;
pub mod document;
pub mod error;
pub mod job;
pub mod load;
pub mod options;
pub mod prelude;
pub mod status;

pub use convert::Converter;
pub use document::{CellEntry, ImageEntry, SheetDocument, DEFAULT_SHEET_TITLE};
pub use error::{Error, ErrorKind, InputError, Result};
pub use job::{convert_file, run_job};
pub use load::{load_lexicon, load_worksheet};
pub use options::{ConvertOptions, OutputFormat};
pub use status::{
    truncate_message, JobStatus, JsonStatusFile, LogStatus, StatusError, StatusRecord,
    MAX_STATUS_MESSAGE_LEN,
};

// Re-export the pipeline crates
pub use duke_layout_core::{
    BorderStyle, Cell, CellAddress, CellRange, CellValue, Grid, GridOptions, HorizontalAlignment,
    ImageAnchor, Row, Style, Worksheet,
};
pub use duke_layout_csv::{CsvError, CsvReadOptions, CsvReader};
pub use duke_layout_engine::{
    infer_blocks, Block, BlockAccumulator, EngineError, Lexicon, RowClass, RowClassifier, RowSpan,
    TableBuilder, TableStructure,
};
pub use duke_layout_render::{
    ExportOptions, HtmlRenderer, ImagePlan, RenderError, RenderOptions, SqlExporter, TableExport,
};
