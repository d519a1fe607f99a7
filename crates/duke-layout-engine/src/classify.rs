//! Row classification
//!
//! Every row of a [`Grid`] receives exactly one [`RowClass`]. The rules are an
//! ordered chain of predicates evaluated by [`RowClassifier::classify`]; the
//! first one that matches decides the class:
//!
//! 1. [`RowClass::Empty`]: no visible content
//! 2. [`RowClass::Title`]: near the top, before anything else was classified
//! 3. [`RowClass::Footer`]: a lone disclaimer near the bottom
//! 4. [`RowClass::SectionHeader`]: a short known heading in the first column
//! 5. [`RowClass::TableRow`]: several cells, a wide merge, a border, or a
//!    continuation of a table
//! 6. [`RowClass::Paragraph`]: everything else
//!
//! Classification never fails. Unrecognized shapes end up as paragraphs.

use std::fmt;

use duke_layout_core::{Cell, Grid, Row};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::error::{EngineError, EngineResult};
use crate::lexicon::{Lexicon, DEFAULT_TITLE_PATTERN};

static DEFAULT_TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    compile_title_pattern(DEFAULT_TITLE_PATTERN).expect("Invalid default title pattern")
});

fn compile_title_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Classification of a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowClass {
    /// No visible content; separates blocks
    Empty,
    /// Document title
    Title,
    /// Heading that opens a section
    SectionHeader,
    /// Row of a data table
    TableRow,
    /// Line of descriptive prose
    Paragraph,
    /// Disclaimer at the end of the sheet
    Footer,
}

impl RowClass {
    /// Short lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            RowClass::Empty => "empty",
            RowClass::Title => "title",
            RowClass::SectionHeader => "section_header",
            RowClass::TableRow => "table_row",
            RowClass::Paragraph => "paragraph",
            RowClass::Footer => "footer",
        }
    }

    /// Check if a following row should lean towards being a table row
    pub fn continues_table(&self) -> bool {
        matches!(self, RowClass::TableRow | RowClass::SectionHeader)
    }
}

impl fmt::Display for RowClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a row within its sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowContext {
    /// 1-based index of the row being classified
    pub row_index: u32,
    /// Number of rows in the sheet
    pub total_rows: u32,
    /// First column of the sheet
    pub min_column: u16,
}

impl RowContext {
    /// Context of a row inside a grid
    pub fn for_row(grid: &Grid, row: &Row) -> Self {
        Self {
            row_index: row.index,
            total_rows: grid.row_count(),
            min_column: grid.min_column(),
        }
    }
}

/// A row paired with its classification
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedRow<'a> {
    pub row: &'a Row,
    pub class: RowClass,
}

/// The ordered predicate chain, configured by a [`Lexicon`]
#[derive(Debug, Clone)]
pub struct RowClassifier {
    lexicon: Lexicon,
    title_pattern: Regex,
    section_headers: Vec<String>,
    descriptive_keywords: Vec<String>,
    footer_keywords: Vec<String>,
    title_keywords: Vec<String>,
    title_markers: Vec<String>,
}

impl Default for RowClassifier {
    fn default() -> Self {
        Self::with_pattern(Lexicon::default(), DEFAULT_TITLE_REGEX.clone())
    }
}

impl RowClassifier {
    /// Create a classifier from a lexicon
    pub fn new(lexicon: Lexicon) -> EngineResult<Self> {
        lexicon.validate()?;
        let pattern = compile_title_pattern(&lexicon.title_pattern).map_err(|source| {
            EngineError::InvalidPattern {
                pattern: lexicon.title_pattern.clone(),
                source,
            }
        })?;
        Ok(Self::with_pattern(lexicon, pattern))
    }

    fn with_pattern(lexicon: Lexicon, title_pattern: Regex) -> Self {
        let upper = |items: &[String]| -> Vec<String> {
            items.iter().map(|s| s.to_uppercase()).collect()
        };
        let lower = |items: &[String]| -> Vec<String> {
            items.iter().map(|s| s.to_lowercase()).collect()
        };
        Self {
            section_headers: upper(&lexicon.section_headers),
            descriptive_keywords: lower(&lexicon.descriptive_keywords),
            footer_keywords: lower(&lexicon.footer_keywords),
            title_keywords: lower(&lexicon.title_keywords),
            title_markers: lower(&lexicon.title_markers),
            title_pattern,
            lexicon,
        }
    }

    /// The lexicon this classifier was built from
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Classify one row
    ///
    /// `previous` is the class of the closest preceding non-empty row, or
    /// `None` at the start of the sheet.
    pub fn classify(&self, row: &Row, previous: Option<RowClass>, ctx: &RowContext) -> RowClass {
        if row.is_empty() {
            return RowClass::Empty;
        }
        if self.is_title(row, previous, ctx) {
            return RowClass::Title;
        }
        if self.is_footer(row, ctx) {
            return RowClass::Footer;
        }
        if self.is_section_header(row, ctx) {
            return RowClass::SectionHeader;
        }
        self.table_or_paragraph(row, previous)
    }

    /// Title rule
    ///
    /// Only applies within the first rows and before any other row was
    /// classified. The first non-empty cell must either be wide with long
    /// text, name a conductor together with a voltage rating, or carry a
    /// title marker.
    pub fn is_title(&self, row: &Row, previous: Option<RowClass>, ctx: &RowContext) -> bool {
        if ctx.row_index > self.lexicon.title_window || previous.is_some() {
            return false;
        }
        let Some(first) = row.first_non_empty() else {
            return false;
        };
        let text = first.text();
        let text = text.trim();
        let lower = text.to_lowercase();

        let long_and_wide = text.chars().count() > self.lexicon.title_min_length
            && spans_half(first, row);
        let rated_conductor = contains_any(&lower, &self.title_keywords)
            && self.title_pattern.is_match(text);
        let marked = contains_any(&lower, &self.title_markers);

        long_and_wide || rated_conductor || marked
    }

    /// Footer rule
    ///
    /// Only applies within the last rows of the sheet, to rows holding a
    /// single visible cell whose text contains a footer keyword.
    pub fn is_footer(&self, row: &Row, ctx: &RowContext) -> bool {
        if ctx.row_index as u64 + self.lexicon.footer_window as u64 <= ctx.total_rows as u64 {
            return false;
        }
        let mut cells = row.non_empty_cells();
        let (Some(only), None) = (cells.next(), cells.next()) else {
            return false;
        };
        contains_any(&only.text().to_lowercase(), &self.footer_keywords)
    }

    /// Section header rule
    ///
    /// The first non-empty cell must start in the sheet's first column and
    /// hold a short, single-line heading from the vocabulary with no
    /// descriptive phrase in it. It must also dominate the row: either span
    /// at least half of it, or leave the other cells empty, covered by its
    /// own merge, or holding short codes.
    pub fn is_section_header(&self, row: &Row, ctx: &RowContext) -> bool {
        let Some(first) = row.first_non_empty() else {
            return false;
        };
        if first.col() != ctx.min_column {
            return false;
        }

        let text = first.text();
        let text = text.trim();
        if !contains_any(&text.to_uppercase(), &self.section_headers) {
            return false;
        }
        if text.split_whitespace().count() > self.lexicon.section_max_words
            || text.contains('\n')
            || contains_any(&text.to_lowercase(), &self.descriptive_keywords)
        {
            return false;
        }

        spans_half(first, row) || self.only_significant_cell(row, first)
    }

    fn only_significant_cell(&self, row: &Row, first: &Cell) -> bool {
        row.cells()
            .iter()
            .filter(|cell| cell.address != first.address)
            .all(|cell| {
                let own_merge = matches!(
                    (cell.merge, first.merge),
                    (Some(a), Some(b)) if a.id == b.id
                );
                own_merge
                    || cell.is_empty()
                    || cell.text().trim().chars().count() <= self.lexicon.short_code_length
            })
    }

    /// Table row rule, with the paragraph fallback
    ///
    /// A row is tabular when it has several visible cells, a single merged
    /// cell, a bordered first cell, or follows a table row or section
    /// header. A lone unbordered cell spanning more than half the row with
    /// long text is prose unless it continues a table.
    pub fn table_or_paragraph(&self, row: &Row, previous: Option<RowClass>) -> RowClass {
        let Some(first) = row.first_non_empty() else {
            return RowClass::Paragraph;
        };
        let count = row.non_empty_cells().count();
        let bordered = first.has_border();
        let continuation = previous.map(|p| p.continues_table()).unwrap_or(false);
        let lone_merge = count == 1 && first.colspan > 1;

        if !(count > 1 || lone_merge || bordered || continuation) {
            return RowClass::Paragraph;
        }

        let wide = first.colspan as usize * 2 > row.len();
        let wordy = first.text().split_whitespace().count() > self.lexicon.paragraph_min_words;
        if lone_merge && wide && wordy && !bordered && !continuation {
            return RowClass::Paragraph;
        }
        RowClass::TableRow
    }

    /// Classify every row of a grid in order
    ///
    /// The previous class handed to each row is that of the nearest earlier
    /// non-empty row.
    pub fn classify_grid<'g>(&self, grid: &'g Grid) -> Vec<ClassifiedRow<'g>> {
        grid.rows()
            .iter()
            .scan(None, |previous: &mut Option<RowClass>, row| {
                let ctx = RowContext::for_row(grid, row);
                let class = self.classify(row, *previous, &ctx);
                tracing::debug!("Row {}: {}", row.index, class);
                if class != RowClass::Empty {
                    *previous = Some(class);
                }
                Some(ClassifiedRow { row, class })
            })
            .collect()
    }
}

/// Whether a cell spans at least half of the row's columns
fn spans_half(cell: &Cell, row: &Row) -> bool {
    cell.colspan as usize * 2 >= row.len()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}
