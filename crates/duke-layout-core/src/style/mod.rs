//! Cell styling types
//!
//! Only the attributes the layout heuristics look at are kept:
//! - [`Style`] - Complete cell style
//! - [`BorderStyle`] - Which cell edges carry a border
//! - [`HorizontalAlignment`] - Horizontal text alignment

mod alignment;
mod border;

pub use alignment::HorizontalAlignment;
pub use border::BorderStyle;

/// Complete cell style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Bold font
    pub bold: bool,
    /// Horizontal alignment
    pub horizontal: HorizontalAlignment,
    /// Border edges
    pub border: BorderStyle,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = align;
        self
    }

    /// Set border edges
    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Check if any edge of the cell carries a visible border
    pub fn has_border(&self) -> bool {
        !self.border.is_empty()
    }
}
