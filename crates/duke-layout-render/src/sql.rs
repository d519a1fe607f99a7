//! Tabular export of one named section as SQL
//!
//! The exporter looks for the first section header mentioning the target
//! label, takes the table blocks that directly follow it and turns them into
//! a `CREATE TABLE` statement plus batched `INSERT`s. Column names come from
//! the first row of the section.

use std::fmt;

use ahash::AHashMap;
use duke_layout_core::Row;
use duke_layout_engine::Block;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{RenderError, RenderResult};
use crate::options::ExportOptions;

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));
static NON_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("Invalid identifier regex"));

/// Turn header text into a column identifier
///
/// Whitespace runs become underscores, everything outside `[a-zA-Z0-9_]` is
/// dropped and the result is lowercased. May return an empty string.
pub fn sanitize_identifier(text: &str) -> String {
    let underscored = WHITESPACE.replace_all(text.trim(), "_");
    NON_IDENTIFIER.replace_all(&underscored, "").to_lowercase()
}

/// SQL literal for a value; `None` is `NULL`
pub fn quote_value(value: Option<&str>) -> String {
    match value {
        None => "NULL".to_string(),
        Some(v) => format!("'{}'", v.replace('\\', "\\\\").replace('\'', "''")),
    }
}

/// Why a section produced no table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDataReason {
    /// The section has no table rows
    NoRows,
    /// No row of the section has content to name the columns after
    NoHeader,
    /// The header row yields no usable identifiers
    NoColumns,
}

impl fmt::Display for NoDataReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoDataReason::NoRows => write!(f, "No table data"),
            NoDataReason::NoHeader => write!(f, "No header row"),
            NoDataReason::NoColumns => write!(f, "No valid headers"),
        }
    }
}

/// One exported data row
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    /// Row index in the sheet
    pub source_row: u32,
    /// One value per column, `None` for empty cells and padding
    pub values: Vec<Option<String>>,
}

/// A section extracted as a table
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    /// `CREATE TABLE` statement
    pub fn create_statement(&self) -> String {
        let mut sql = format!("CREATE TABLE IF NOT EXISTS `{}` (\n", self.name);
        sql.push_str("  `import_id` INT AUTO_INCREMENT PRIMARY KEY,\n");
        for column in &self.columns {
            sql.push_str(&format!("  `{}` TEXT NULL,\n", column));
        }
        sql.push_str("  `source_row_index` INT NULL,\n");
        sql.push_str("  `imported_at` TIMESTAMP DEFAULT CURRENT_TIMESTAMP\n");
        sql.push_str(");\n");
        sql
    }

    /// `INSERT` statements with at most `batch_size` rows each
    pub fn insert_statements(&self, batch_size: usize) -> Vec<String> {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("`{}`", c))
            .chain(std::iter::once("`source_row_index`".to_string()))
            .collect::<Vec<_>>()
            .join(", ");
        let insert = format!("INSERT INTO `{}` ({}) VALUES ", self.name, columns);

        self.rows
            .chunks(batch_size.max(1))
            .map(|chunk| {
                let values = chunk
                    .iter()
                    .map(|row| {
                        let mut literals: Vec<String> =
                            row.values.iter().map(|v| quote_value(v.as_deref())).collect();
                        literals.push(row.source_row.to_string());
                        format!("({})", literals.join(", "))
                    })
                    .collect::<Vec<_>>()
                    .join(",\n");
                format!("{}{};\n", insert, values)
            })
            .collect()
    }
}

/// Result of exporting a section
#[derive(Debug, Clone, PartialEq)]
pub enum TableExport {
    /// The section holds a table
    Data(ExportTable),
    /// The section exists but has nothing to export
    NoData { section: String, reason: NoDataReason },
}

impl TableExport {
    /// Render as a SQL script
    pub fn to_sql(&self, batch_size: usize) -> String {
        match self {
            TableExport::Data(table) => {
                let mut sql = table.create_statement();
                sql.push_str("\n-- Data Inserts --\n");
                for statement in table.insert_statements(batch_size) {
                    sql.push_str(&statement);
                }
                sql
            }
            TableExport::NoData { section, reason } => format!("-- {} for {}.\n", reason, section),
        }
    }
}

/// Extracts a named section from a block sequence
#[derive(Debug, Clone, Default)]
pub struct SqlExporter {
    options: ExportOptions,
}

impl SqlExporter {
    /// Create an exporter
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// The options in use
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export the target section as a SQL script
    pub fn export(&self, blocks: &[Block]) -> RenderResult<String> {
        let export = self.extract(blocks)?;
        if let TableExport::NoData { reason, .. } = &export {
            tracing::warn!("Section '{}': {}", self.options.section, reason);
        }
        Ok(export.to_sql(self.options.batch_size))
    }

    /// Extract the target section
    ///
    /// Fails when no section header mentions the target label.
    pub fn extract(&self, blocks: &[Block]) -> RenderResult<TableExport> {
        let rows = section_rows(blocks, &self.options.section)?;
        let no_data = |reason| TableExport::NoData {
            section: self.options.section.clone(),
            reason,
        };
        if rows.is_empty() {
            return Ok(no_data(NoDataReason::NoRows));
        }

        let Some(header_at) = rows.iter().position(|r| !r.is_empty()) else {
            return Ok(no_data(NoDataReason::NoHeader));
        };
        let max_column = rows.iter().map(|r| r.last_data_column()).max().unwrap_or(0);
        let columns = unique_identifiers(
            rows[header_at]
                .visible_cells()
                .filter(|c| c.col() <= max_column)
                .map(|c| sanitize_identifier(&c.text()))
                .filter(|id| !id.is_empty()),
        );
        if columns.is_empty() {
            return Ok(no_data(NoDataReason::NoColumns));
        }
        tracing::info!("Export columns: {:?}", columns);

        let data = rows[header_at + 1..]
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| export_row(r, columns.len()))
            .collect();

        Ok(TableExport::Data(ExportTable {
            name: self.table_name(),
            columns,
            rows: data,
        }))
    }

    /// `<prefix>_<job id>_<section>`, cut to the identifier limit
    pub fn table_name(&self) -> String {
        let name = format!(
            "{}_{}_{}",
            self.options.table_prefix,
            self.options.job_id,
            sanitize_identifier(&self.options.section)
        );
        name.chars().take(self.options.max_identifier_length).collect()
    }
}

/// Rows of the table blocks directly following the target section header
fn section_rows<'b>(blocks: &'b [Block], section: &str) -> RenderResult<Vec<&'b Row>> {
    let label = section.to_uppercase();
    let start = blocks
        .iter()
        .position(|b| match b {
            Block::SectionHeader { text, .. } => text.to_uppercase().contains(&label),
            _ => false,
        })
        .ok_or_else(|| RenderError::SectionNotFound(section.to_string()))?;
    tracing::info!("Found export section '{}'", section);

    let mut rows = Vec::new();
    for block in &blocks[start + 1..] {
        match block {
            Block::Table { rows: table } => rows.extend(table.iter()),
            other => {
                tracing::debug!("Export section ends at {} block", other.kind());
                break;
            }
        }
    }
    Ok(rows)
}

/// Values of a data row, one per column
///
/// Each visible cell fills as many column slots as it spans, so a merged
/// cell pushes the following values to the right. Missing values are padded
/// with `None`.
fn export_row(row: &Row, width: usize) -> ExportRow {
    let mut values = Vec::with_capacity(width);
    let mut slots = 0usize;
    for cell in row.visible_cells() {
        if slots >= width {
            break;
        }
        values.push((!cell.is_empty()).then(|| cell.text()));
        slots += cell.colspan as usize;
    }
    values.resize(width, None);
    ExportRow {
        source_row: row.index,
        values,
    }
}

/// Suffix repeated identifiers with `_2`, `_3`, ...
fn unique_identifiers(ids: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: AHashMap<String, usize> = AHashMap::new();
    let mut unique = Vec::new();
    for id in ids {
        let count = seen.entry(id.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            unique.push(id);
        } else {
            let mut n = *count;
            let mut candidate = format!("{}_{}", id, n);
            while seen.contains_key(&candidate) {
                n += 1;
                candidate = format!("{}_{}", id, n);
            }
            seen.insert(candidate.clone(), 1);
            unique.push(candidate);
        }
    }
    unique
}
