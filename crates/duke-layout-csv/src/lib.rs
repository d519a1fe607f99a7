//! # duke-layout-csv
//!
//! CSV reader for duke-layout. Every record becomes one sheet row; CSV has no
//! styles or merges, so layout inference works from cell placement alone.

mod error;
mod options;
mod reader;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvReader;
