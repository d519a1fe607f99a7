//! Image anchors
//!
//! Images are decoded and stored by an external collaborator; the layout
//! pipeline only needs to know where each one is anchored.

/// An image placed on the sheet
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageAnchor {
    /// Anchor row (1-based)
    pub row: u32,
    /// Anchor column (1-based)
    pub col: u16,
    /// Opaque asset reference (usually a storage-relative path)
    pub asset: String,
}

impl ImageAnchor {
    /// Create a new anchor
    pub fn new<S: Into<String>>(row: u32, col: u16, asset: S) -> Self {
        Self {
            row,
            col,
            asset: asset.into(),
        }
    }
}
