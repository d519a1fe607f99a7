//! # duke-layout-render
//!
//! Output for inferred spreadsheet layouts:
//! - [`HtmlRenderer`] - a self-contained HTML document with images placed
//!   next to the blocks they belong to
//! - [`SqlExporter`] - one named section exported as `CREATE TABLE` and
//!   batched `INSERT` statements

pub mod error;
pub mod html;
pub mod images;
pub mod options;
pub mod sql;

pub use error::{RenderError, RenderResult};
pub use html::{render_table, text_with_breaks, HtmlRenderer};
pub use images::{ImagePlan, TITLE_IMAGE_ROWS};
pub use options::{
    ExportOptions, RenderOptions, DEFAULT_ASSET_PREFIX, DEFAULT_BATCH_SIZE,
    DEFAULT_EXPORT_SECTION, DEFAULT_TABLE_PREFIX, MAX_IDENTIFIER_LENGTH,
};
pub use sql::{
    quote_value, sanitize_identifier, ExportRow, ExportTable, NoDataReason, SqlExporter,
    TableExport,
};
