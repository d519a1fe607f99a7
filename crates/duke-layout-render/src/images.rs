//! Placement of image anchors between blocks
//!
//! An image goes immediately before the block whose rows include its anchor
//! row (or the next block, when the anchor sits on a blank row). Images
//! anchored in the first rows, at or above the title, are moved right after
//! the title instead. Anchors below the last block go at the end.

use ahash::AHashSet;
use duke_layout_core::ImageAnchor;
use duke_layout_engine::Block;

/// Anchors in rows up to this one may belong to the title
pub const TITLE_IMAGE_ROWS: u32 = 5;

/// Where every image of a document goes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagePlan {
    before: Vec<Vec<ImageAnchor>>,
    after_title: Vec<ImageAnchor>,
    trailing: Vec<ImageAnchor>,
    title_index: Option<usize>,
}

impl ImagePlan {
    /// Plan the placement of `anchors` among `blocks`
    ///
    /// Anchors are handled in row order. Invalid anchors and repeated asset
    /// references are skipped with a warning.
    pub fn new(blocks: &[Block], anchors: &[ImageAnchor]) -> Self {
        let title_index = blocks.iter().position(|b| matches!(b, Block::Title { .. }));
        let mut plan = Self {
            before: vec![Vec::new(); blocks.len()],
            title_index,
            ..Default::default()
        };

        let mut ordered: Vec<&ImageAnchor> = anchors.iter().collect();
        ordered.sort_by_key(|a| (a.row, a.col));

        let mut used = AHashSet::new();
        for anchor in ordered {
            if anchor.row == 0 || anchor.asset.trim().is_empty() {
                tracing::warn!(
                    "Skipping invalid image anchor at R{}C{} ('{}')",
                    anchor.row,
                    anchor.col,
                    anchor.asset
                );
                continue;
            }
            if !used.insert(anchor.asset.as_str()) {
                tracing::warn!(
                    "Skipping duplicate image '{}' at row {}",
                    anchor.asset,
                    anchor.row
                );
                continue;
            }

            let target = blocks.iter().position(|b| b.span().last >= anchor.row);
            match (target, title_index) {
                (Some(t), Some(title)) if anchor.row <= TITLE_IMAGE_ROWS && t <= title => {
                    plan.after_title.push(anchor.clone())
                }
                (Some(t), _) => plan.before[t].push(anchor.clone()),
                (None, _) => plan.trailing.push(anchor.clone()),
            }
        }
        plan
    }

    /// Images placed immediately before a block
    pub fn before(&self, block: usize) -> &[ImageAnchor] {
        self.before.get(block).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Images placed immediately after a block
    pub fn after(&self, block: usize) -> &[ImageAnchor] {
        if self.title_index == Some(block) {
            &self.after_title
        } else {
            &[]
        }
    }

    /// Images placed after the last block
    pub fn trailing(&self) -> &[ImageAnchor] {
        &self.trailing
    }

    /// Number of placed images
    pub fn len(&self) -> usize {
        let inline: usize = self.before.iter().map(Vec::len).sum();
        inline + self.after_title.len() + self.trailing.len()
    }

    /// Check if no image is placed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duke_layout_engine::RowSpan;
    use pretty_assertions::assert_eq;

    fn blocks() -> Vec<Block> {
        vec![
            Block::Title {
                row: 2,
                text: "Cable".to_string(),
            },
            Block::SectionHeader {
                row: 4,
                text: "DIMENSIONS".to_string(),
            },
            Block::Paragraph {
                span: RowSpan { first: 8, last: 9 },
                lines: vec!["a".to_string(), "b".to_string()],
            },
        ]
    }

    fn assets(anchors: &[ImageAnchor]) -> Vec<&str> {
        anchors.iter().map(|a| a.asset.as_str()).collect()
    }

    #[test]
    fn test_image_before_its_block() {
        let plan = ImagePlan::new(&blocks(), &[ImageAnchor::new(9, 1, "drawing.png")]);
        assert_eq!(assets(plan.before(2)), vec!["drawing.png"]);
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_blank_row_anchor_goes_to_next_block() {
        let plan = ImagePlan::new(&blocks(), &[ImageAnchor::new(6, 1, "gap.png")]);
        assert_eq!(assets(plan.before(2)), vec!["gap.png"]);
    }

    #[test]
    fn test_early_image_follows_title() {
        let plan = ImagePlan::new(
            &blocks(),
            &[
                ImageAnchor::new(1, 3, "logo.png"),
                ImageAnchor::new(4, 1, "section.png"),
            ],
        );
        assert_eq!(assets(plan.after(0)), vec!["logo.png"]);
        assert!(plan.before(0).is_empty());
        // Below the title, so it stays inline
        assert_eq!(assets(plan.before(1)), vec!["section.png"]);
    }

    #[test]
    fn test_early_image_without_title_is_inline() {
        let blocks = vec![Block::SectionHeader {
            row: 3,
            text: "DIMENSIONS".to_string(),
        }];
        let plan = ImagePlan::new(&blocks, &[ImageAnchor::new(1, 1, "logo.png")]);
        assert_eq!(assets(plan.before(0)), vec!["logo.png"]);
    }

    #[test]
    fn test_duplicates_and_invalid_anchors_skipped() {
        let plan = ImagePlan::new(
            &blocks(),
            &[
                ImageAnchor::new(8, 1, "same.png"),
                ImageAnchor::new(9, 1, "same.png"),
                ImageAnchor::new(0, 1, "zero.png"),
                ImageAnchor::new(8, 2, " "),
                ImageAnchor::new(40, 1, "end.png"),
            ],
        );
        assert_eq!(assets(plan.before(2)), vec!["same.png"]);
        assert_eq!(assets(plan.trailing()), vec!["end.png"]);
        assert_eq!(plan.len(), 2);
    }
}
