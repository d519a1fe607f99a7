//! HTML rendering
//!
//! Produces a single self-contained Bootstrap page. Block mapping:
//!
//! | Block | Element |
//! |-------|---------|
//! | Title | `<h1 class="cable-title">` |
//! | SectionHeader | `<h2 class="section-header">` |
//! | Paragraph | `<p class="section-description">` |
//! | Footer | `<div class="footer-text">` |
//! | Table | `<div class="table-responsive"><table ...>` |

use duke_layout_core::{HorizontalAlignment, ImageAnchor};
use duke_layout_engine::{Block, CellKind, TableBuilder, TableCell, TableStructure};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::error::{RenderError, RenderResult};
use crate::images::ImagePlan;
use crate::options::RenderOptions;

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
"#;

const DOCUMENT_STYLE: &str = r#"    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.2.3/dist/css/bootstrap.min.css" rel="stylesheet" integrity="sha384-rbsA2VBKQhggwzxH7pPCaAqO46MgnOM80zW1RWuH61DGLwZJEdK2Kadq2F9CUG65" crossorigin="anonymous">
    <style>
        body { font-family: sans-serif; padding-top: 1rem; font-size: 0.9rem; background-color: #f8f9fa; }
        .excel-container { max-width: 1200px; margin: auto; background-color: #fff; padding: 1.5rem; border-radius: 8px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }
        .cable-title { font-size: 1.8rem; font-weight: bold; margin: 1rem 0 1.5rem 0; color: #004085; text-align: center; }
        .section-header { font-size: 1.3rem; font-weight: bold; margin-top: 2rem; margin-bottom: 1rem; padding-bottom: 0.5rem; border-bottom: 2px solid #dee2e6; color: #495057; text-align: center; }
        .section-description { margin-bottom: 1rem; text-align: justify; line-height: 1.6; color: #333; }
        .table-responsive { margin-bottom: 1.5rem; border: 1px solid #dee2e6; border-radius: 5px; overflow-x: auto; }
        .table { margin-bottom: 0; }
        .table thead th { background-color: #e9ecef; font-weight: bold; text-align: center; vertical-align: middle; border-color: #dee2e6; border-bottom-width: 2px; padding: 0.5rem 0.6rem; }
        .table tbody th { background-color: #f8f9fa; font-weight: 600; text-align: left; border-color: #dee2e6; padding: 0.4rem 0.5rem; }
        .table td, .table th { vertical-align: middle; text-align: left; border-color: #dee2e6; padding: 0.4rem 0.5rem; }
        .table td.text-center, .table th.text-center { text-align: center; }
        .table td.text-end, .table th.text-end { text-align: right; }
        .table-bordered > :not(caption) > * > * { border-width: 1px; }
        img.excel-image { max-width: 90%; height: auto; display: block; margin: 1.5rem auto; border: 1px solid #eee; border-radius: 4px; padding: 5px; }
        .footer-text { margin-top: 2rem; padding: 1rem; background-color: #f8f9fa; border-radius: 5px; font-size: 0.85rem; color: #6c757d; border-left: 3px solid #004085; }
    </style>
</head>
<body>
    <div class="container excel-container">
"#;

const DOCUMENT_TAIL: &str = r#"    </div>
    <script src="https://cdn.jsdelivr.net/npm/bootstrap@5.2.3/dist/js/bootstrap.bundle.min.js" integrity="sha384-kenU1KFdBIe4zVF0s0G1M5b4hcpxyD9F7jL+jjXkk+Q2h455rYXK/7HAuoJl+0I4" crossorigin="anonymous"></script>
</body>
</html>
"#;

/// Renders blocks into an HTML document
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a renderer
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The options in use
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a complete document
    ///
    /// Fails with [`RenderError::EmptyDocument`] when neither a block nor an
    /// image produced any markup.
    pub fn render(
        &self,
        sheet_title: &str,
        blocks: &[Block],
        images: &[ImageAnchor],
    ) -> RenderResult<String> {
        let content = self.render_content(blocks, images);
        if content.is_empty() {
            return Err(RenderError::EmptyDocument(sheet_title.to_string()));
        }

        let title = self.options.title.as_deref().unwrap_or(sheet_title);
        let mut html = String::with_capacity(content.len() + 4096);
        html.push_str(DOCUMENT_HEAD);
        html.push_str(&format!("    <title>{}</title>\n", encode_text(title)));
        html.push_str(DOCUMENT_STYLE);
        html.push_str(&content);
        html.push_str(DOCUMENT_TAIL);

        tracing::info!(
            "Rendered '{}': {} blocks, {} bytes",
            sheet_title,
            blocks.len(),
            html.len()
        );
        Ok(html)
    }

    /// Render the page body: blocks with their images, one element per line
    pub fn render_content(&self, blocks: &[Block], images: &[ImageAnchor]) -> String {
        let plan = ImagePlan::new(blocks, images);
        let mut content = String::new();
        let mut push = |element: String| {
            content.push_str("        ");
            content.push_str(&element);
            content.push('\n');
        };

        for (i, block) in blocks.iter().enumerate() {
            for anchor in plan.before(i) {
                push(self.image_tag(anchor));
            }
            if let Some(element) = self.render_block(block) {
                push(element);
            }
            for anchor in plan.after(i) {
                push(self.image_tag(anchor));
            }
        }
        for anchor in plan.trailing() {
            push(self.image_tag(anchor));
        }
        content
    }

    /// Render one block
    ///
    /// Returns `None` for a table with nothing left to render and for blocks
    /// without text.
    pub fn render_block(&self, block: &Block) -> Option<String> {
        match block {
            Block::Title { text, .. } => {
                Self::non_empty(text).map(|t| format!("<h1 class=\"cable-title\">{}</h1>", t))
            }
            Block::SectionHeader { text, .. } => Self::non_empty(text)
                .map(|t| format!("<h2 class=\"section-header\">{}</h2>", t)),
            Block::Paragraph { lines, .. } => Self::non_empty(&lines.join("\n"))
                .map(|t| format!("<p class=\"section-description\">{}</p>", t)),
            Block::Footer { text, .. } => {
                Self::non_empty(text).map(|t| format!("<div class=\"footer-text\">{}</div>", t))
            }
            Block::Table { rows } => TableBuilder::build(rows).map(|table| render_table(&table)),
        }
    }

    fn non_empty(text: &str) -> Option<String> {
        if text.trim().is_empty() {
            None
        } else {
            Some(text_with_breaks(text))
        }
    }

    /// `<img>` element for an anchor
    pub fn image_tag(&self, anchor: &ImageAnchor) -> String {
        let src = format!("{}{}", self.options.asset_prefix, anchor.asset);
        format!(
            "<img src=\"{}\" class=\"excel-image img-fluid rounded my-3\" alt=\"Image from Excel near row {}\" loading=\"lazy\">",
            encode_double_quoted_attribute(&src),
            anchor.row
        )
    }
}

/// Render a reconstructed table inside its scrollable container
pub fn render_table(table: &TableStructure) -> String {
    let mut html = String::from(
        "<div class=\"table-responsive\"><table class=\"table table-bordered table-sm\">",
    );
    if !table.header.is_empty() {
        html.push_str("<thead>");
        for row in &table.header {
            html.push_str("<tr>");
            for cell in &row.cells {
                html.push_str(&render_cell(cell));
            }
            html.push_str("</tr>");
        }
        html.push_str("</thead>");
    }
    html.push_str("<tbody>");
    for row in &table.body {
        html.push_str("<tr>");
        for cell in &row.cells {
            html.push_str(&render_cell(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");
    html
}

fn render_cell(cell: &TableCell) -> String {
    let (tag, scope) = match cell.kind {
        CellKind::Header => ("th", ""),
        CellKind::RowHeader => ("th", " scope=\"row\""),
        CellKind::Data => ("td", ""),
    };

    let mut attrs = String::from(scope);
    if cell.colspan > 1 {
        attrs.push_str(&format!(" colspan=\"{}\"", cell.colspan));
    }
    if cell.rowspan > 1 {
        attrs.push_str(&format!(" rowspan=\"{}\"", cell.rowspan));
    }
    match cell.align {
        HorizontalAlignment::Center => attrs.push_str(" class=\"text-center\""),
        HorizontalAlignment::Right => attrs.push_str(" class=\"text-end\""),
        _ => {}
    }

    format!("<{tag}{attrs}>{}</{tag}>", text_with_breaks(&cell.text))
}

/// Escape text and turn its line breaks into `<br>`
///
/// Every line is trimmed; leading and trailing blank lines are dropped.
pub fn text_with_breaks(text: &str) -> String {
    text.trim()
        .split('\n')
        .map(|line| encode_text(line.trim()).into_owned())
        .collect::<Vec<_>>()
        .join("<br>")
}
