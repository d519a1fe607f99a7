//! JSON sheet documents
//!
//! A sheet document is the interchange format spreadsheet readers hand to
//! duke-layout: calculated values, the style flags layout inference looks at,
//! merge ranges and image anchors.
//!
//! ```json
//! {
//!   "title": "NYY",
//!   "cells": [
//!     { "ref": "A1", "value": "NYY 0.6/1kV", "bold": true },
//!     { "ref": "B3", "value": 16, "align": "center", "border": true }
//!   ],
//!   "merges": ["A1:D1"],
//!   "images": [{ "row": 1, "col": 5, "asset": "job_1_images/image_1.png" }]
//! }
//! ```

use duke_layout_core::{
    BorderStyle, CellAddress, CellRange, CellValue, HorizontalAlignment, ImageAnchor, Style,
    Worksheet,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{InputError, Result};

/// Title used when a document has none
pub const DEFAULT_SHEET_TITLE: &str = "Sheet1";

/// A sheet as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cells: Vec<CellEntry>,
    /// A1-style ranges, e.g. `"A1:D1"`
    #[serde(default)]
    pub merges: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

/// One cell of a sheet document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEntry {
    /// A1-style address
    #[serde(rename = "ref")]
    pub reference: String,
    /// `null`, boolean, number or string
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    /// Horizontal alignment name (`left`, `center`, `right`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    /// Whether the cell has a visible border
    #[serde(default, skip_serializing_if = "is_false")]
    pub border: bool,
}

/// An image anchor of a sheet document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub row: u32,
    #[serde(default = "first_column")]
    pub col: u16,
    pub asset: String,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn first_column() -> u16 {
    1
}

impl SheetDocument {
    /// Parse a document from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(InputError::Json)?)
    }

    /// Serialize the document as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(InputError::Json)?)
    }

    /// Build the staging worksheet
    ///
    /// Bad addresses and values are input errors; overlapping or degenerate
    /// merges are structure errors.
    pub fn into_worksheet(self) -> Result<Worksheet> {
        let title = if self.title.trim().is_empty() {
            DEFAULT_SHEET_TITLE.to_string()
        } else {
            self.title
        };
        let mut sheet = Worksheet::new(title);

        for entry in self.cells {
            let address = CellAddress::parse(&entry.reference).map_err(|e| {
                InputError::InvalidDocument(format!("cell '{}': {}", entry.reference, e))
            })?;
            let value = json_to_value(&entry.value).ok_or_else(|| {
                InputError::InvalidDocument(format!(
                    "cell '{}': unsupported value {}",
                    entry.reference, entry.value
                ))
            })?;
            let style = entry_style(&entry)?;

            sheet.set_cell_value_at(address.row, address.col, value)?;
            sheet.set_cell_style_at(address.row, address.col, &style)?;
        }

        for merge in &self.merges {
            let range = CellRange::parse(merge).map_err(|e| {
                InputError::InvalidDocument(format!("merge '{}': {}", merge, e))
            })?;
            sheet.merge_cells(&range)?;
        }

        for image in self.images {
            sheet.add_image(ImageAnchor::new(image.row, image.col, image.asset));
        }

        tracing::debug!(
            "Loaded sheet document '{}': {} cells, {} merges, {} images",
            sheet.title(),
            sheet.cell_count(),
            sheet.merged_regions().len(),
            sheet.images().len()
        );
        Ok(sheet)
    }

    /// Describe an existing worksheet as a document
    pub fn from_worksheet(sheet: &Worksheet) -> Self {
        let cells = sheet
            .iter_cells()
            .map(|(row, col, data)| CellEntry {
                reference: CellAddress::new(row, col).to_a1_string(),
                value: value_to_json(&data.value),
                bold: data.style.bold,
                align: match data.style.horizontal {
                    HorizontalAlignment::General => None,
                    other => Some(other.as_str().to_string()),
                },
                border: data.style.has_border(),
            })
            .collect();

        Self {
            title: sheet.title().to_string(),
            cells,
            merges: sheet
                .merged_regions()
                .iter()
                .map(|m| m.range().to_a1_string())
                .collect(),
            images: sheet
                .images()
                .iter()
                .map(|i| ImageEntry {
                    row: i.row,
                    col: i.col,
                    asset: i.asset.clone(),
                })
                .collect(),
        }
    }
}

fn entry_style(entry: &CellEntry) -> Result<Style> {
    let mut style = Style::new().bold(entry.bold);
    if let Some(align) = &entry.align {
        let align = align.parse::<HorizontalAlignment>().map_err(|e| {
            InputError::InvalidDocument(format!("cell '{}': {}", entry.reference, e))
        })?;
        style = style.horizontal_alignment(align);
    }
    if entry.border {
        style = style.border(BorderStyle::all());
    }
    Ok(style)
}

fn json_to_value(value: &Value) -> Option<CellValue> {
    match value {
        Value::Null => Some(CellValue::Empty),
        Value::Bool(b) => Some(CellValue::Boolean(*b)),
        Value::Number(n) => n.as_f64().map(CellValue::Number),
        Value::String(s) => Some(CellValue::string(s.as_str())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn value_to_json(value: &CellValue) -> Value {
    match value {
        CellValue::Empty => Value::Null,
        CellValue::Boolean(b) => Value::Bool(*b),
        CellValue::Number(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        CellValue::String(s) => Value::String(s.clone()),
        CellValue::Error(e) => Value::String(e.as_str().to_string()),
    }
}
