//! Vocabularies and thresholds used by the row classifier
//!
//! The defaults describe cable datasheets: titles mention a conductor and a
//! voltage rating, sections are named after the usual datasheet headings and
//! footers carry the manufacturer's disclaimer.

use crate::error::{EngineError, EngineResult};

/// Default title voltage pattern, e.g. `0.6/1kV` or `450 / 750 V`
pub const DEFAULT_TITLE_PATTERN: &str = r"\d+(\.\d+)?\s*/\s*\d+(\.\d+)?\s*k?v";

/// Keyword lists and numeric thresholds for row classification
///
/// Matching is case-insensitive. Section headers are compared against the
/// uppercased cell text, every other list against the lowercased text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Lexicon {
    /// Section-header vocabulary
    pub section_headers: Vec<String>,
    /// Phrases that mark a row as prose rather than a heading
    pub descriptive_keywords: Vec<String>,
    /// Disclaimer phrases found in footers
    pub footer_keywords: Vec<String>,
    /// Words that, together with the title pattern, identify a title
    pub title_keywords: Vec<String>,
    /// Regular expression for the voltage rating in a title
    pub title_pattern: String,
    /// Manufacturer or standard markers that identify a title on their own
    pub title_markers: Vec<String>,
    /// Titles are only looked for in the first `title_window` rows
    pub title_window: u32,
    /// Footers are only looked for in the last `footer_window` rows
    pub footer_window: u32,
    /// A wide title cell needs more than this many characters
    pub title_min_length: usize,
    /// Section headers have at most this many words
    pub section_max_words: usize,
    /// Cells next to a section header may hold codes up to this length
    pub short_code_length: usize,
    /// A lone wide cell with more words than this reads as prose
    pub paragraph_min_words: usize,
}

impl Default for Lexicon {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            section_headers: owned(&[
                "APPLICATION",
                "STANDARDS",
                "CHARACTERISTICS",
                "CONSTRUCTION",
                "DIMENSIONS",
                "ELECTRICAL CHARACTERISTICS",
                "CONDUCTORS",
                "DE-RATING",
                "CURRENT CARRYING",
                "VOLTAGE DROP",
                "FACTORS",
                "FEATURES",
                "TECHNICAL DATA",
            ]),
            descriptive_keywords: owned(&[
                "for use in",
                "according to",
                "conductor operates",
                "note",
                "where a conductor",
                "fixed wiring",
                "power networks",
            ]),
            footer_keywords: owned(&[
                "information contained",
                "guidance only",
                "subject to change",
                "liability",
                "tolerances",
                "manufacturing tolerances",
            ]),
            title_keywords: owned(&["cable", "conductor", "wire"]),
            title_pattern: DEFAULT_TITLE_PATTERN.to_string(),
            title_markers: owned(&["basec"]),
            title_window: 3,
            footer_window: 5,
            title_min_length: 15,
            section_max_words: 8,
            short_code_length: 5,
            paragraph_min_words: 10,
        }
    }
}

impl Lexicon {
    /// Check the thresholds for values that would disable a rule silently
    pub fn validate(&self) -> EngineResult<()> {
        if self.section_max_words == 0 {
            return Err(EngineError::InvalidSetting {
                name: "section_max_words",
                message: "must be at least 1".to_string(),
            });
        }
        if self.section_headers.iter().any(|h| h.trim().is_empty()) {
            return Err(EngineError::InvalidSetting {
                name: "section_headers",
                message: "entries must not be blank".to_string(),
            });
        }
        if self.footer_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(EngineError::InvalidSetting {
                name: "footer_keywords",
                message: "entries must not be blank".to_string(),
            });
        }
        Ok(())
    }
}
