//! Sheet to document conversion

use duke_layout_core::{Grid, Worksheet};
use duke_layout_engine::{infer_blocks, Block, ClassifiedRow, RowClassifier};
use duke_layout_render::{HtmlRenderer, SqlExporter};

use crate::error::{InputError, Result};
use crate::options::{ConvertOptions, OutputFormat};

/// Runs the layout pipeline with one set of options
///
/// The classifier is compiled once, so a converter can be reused across
/// sheets.
#[derive(Debug, Clone)]
pub struct Converter {
    classifier: RowClassifier,
    options: ConvertOptions,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            classifier: RowClassifier::default(),
            options: ConvertOptions::default(),
        }
    }
}

impl Converter {
    /// Create a converter
    ///
    /// An unusable lexicon is an input error.
    pub fn new(options: ConvertOptions) -> Result<Self> {
        let classifier = RowClassifier::new(options.lexicon.clone()).map_err(InputError::Lexicon)?;
        Ok(Self {
            classifier,
            options,
        })
    }

    /// The options in use
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// The row classifier in use
    pub fn classifier(&self) -> &RowClassifier {
        &self.classifier
    }

    /// Build the read-only grid for a sheet
    pub fn grid(&self, sheet: &Worksheet) -> Result<Grid> {
        Ok(Grid::build_with_options(sheet, &self.options.grid)?)
    }

    /// Classify every row of a grid
    pub fn classify<'g>(&self, grid: &'g Grid) -> Vec<ClassifiedRow<'g>> {
        self.classifier.classify_grid(grid)
    }

    /// Infer the blocks of a sheet
    pub fn blocks(&self, sheet: &Worksheet) -> Result<Vec<Block>> {
        let grid = self.grid(sheet)?;
        Ok(infer_blocks(&grid, &self.classifier))
    }

    /// Render a sheet as an HTML document, images included
    pub fn to_html(&self, sheet: &Worksheet) -> Result<String> {
        let blocks = self.blocks(sheet)?;
        let renderer = HtmlRenderer::new(self.options.render.clone());
        Ok(renderer.render(sheet.title(), &blocks, sheet.images())?)
    }

    /// Export the configured section of a sheet as SQL
    pub fn to_sql(&self, sheet: &Worksheet) -> Result<String> {
        let blocks = self.blocks(sheet)?;
        let exporter = SqlExporter::new(self.options.export_options());
        Ok(exporter.export(&blocks)?)
    }

    /// Convert a sheet to the configured output format
    pub fn convert(&self, sheet: &Worksheet) -> Result<String> {
        match self.options.format {
            OutputFormat::Html => self.to_html(sheet),
            OutputFormat::Sql => self.to_sql(sheet),
        }
    }
}
