//! Border style types

/// Border presence for a cell
///
/// Line styles and colors do not influence layout inference, so each edge is
/// reduced to whether a border is drawn at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderStyle {
    /// Left border
    pub left: bool,
    /// Right border
    pub right: bool,
    /// Top border
    pub top: bool,
    /// Bottom border
    pub bottom: bool,
}

impl BorderStyle {
    /// Create a new border style with no borders
    pub fn new() -> Self {
        Self::default()
    }

    /// Border on all four edges
    pub fn all() -> Self {
        Self {
            left: true,
            right: true,
            top: true,
            bottom: true,
        }
    }

    /// Check if all borders are empty
    pub fn is_empty(&self) -> bool {
        !(self.left || self.right || self.top || self.bottom)
    }
}
