//! Input boundary: extracted page text and character geometry.
//!
//! The parser does not read source documents itself. A caller supplies, per
//! page, the full extracted text plus the individual characters with their
//! positions; character geometry is used only for layout inference and
//! column splitting. Any extraction tool can feed this interface, and a JSON
//! interchange format is provided for pre-extracted documents.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// One extracted character with its position on the page.
///
/// `x` is the horizontal start of the glyph; `y` grows downward from the top
/// of the page (text-extraction convention).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageChar {
    /// The character
    #[serde(rename = "c")]
    pub ch: char,
    /// Horizontal start position
    pub x: f32,
    /// Vertical position (top of line)
    pub y: f32,
}

/// One page of extracted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page width in the extractor's units
    #[serde(default = "default_width")]
    pub width: f32,
    /// Page height in the extractor's units
    #[serde(default = "default_height")]
    pub height: f32,
    /// Full extracted text of the page, newline-separated lines
    #[serde(default)]
    pub text: String,
    /// Characters with positions, used for layout analysis
    #[serde(default)]
    pub chars: Vec<PageChar>,
}

fn default_width() -> f32 {
    612.0
}

fn default_height() -> f32 {
    792.0
}

impl Page {
    /// Characters sorted by (y, x) reading position.
    pub(crate) fn sorted_chars(&self) -> Vec<PageChar> {
        let mut chars = self.chars.clone();
        chars.sort_by(|a, b| {
            crate::utils::safe_float_cmp(a.y, b.y).then(crate::utils::safe_float_cmp(a.x, b.x))
        });
        chars
    }

    /// Build a single-column page from plain text, synthesizing character
    /// positions at a fixed advance. Intended for tests and fixtures.
    pub fn from_text(text: &str) -> Self {
        Self::from_columns(612.0, 792.0, &[(36.0, text)])
    }

    /// Build a page from per-column text blocks, synthesizing character
    /// positions: each `(x_origin, text)` column is laid out top-down at a
    /// fixed advance and line height. The page `text` field concatenates the
    /// columns in order. Intended for tests and fixtures.
    pub fn from_columns(width: f32, height: f32, columns: &[(f32, &str)]) -> Self {
        const ADVANCE: f32 = 5.0;
        const LINE_HEIGHT: f32 = 12.0;

        let mut chars = Vec::new();
        for &(x0, text) in columns {
            let mut y = 20.0;
            for line in text.lines() {
                let mut x = x0;
                for ch in line.chars() {
                    chars.push(PageChar { ch, x, y });
                    x += ADVANCE;
                }
                y += LINE_HEIGHT;
            }
        }

        let text = columns
            .iter()
            .map(|&(_, t)| t)
            .collect::<Vec<_>>()
            .join("\n");

        Page {
            width,
            height,
            text,
            chars,
        }
    }
}

/// A paginated source of extracted text.
///
/// The parsing core is generic over this trait; it treats page text and
/// character geometry as an injected capability, not a concrete file format.
pub trait PageSource {
    /// All pages of the document in order.
    fn pages(&self) -> &[Page];
}

/// An in-memory extracted document, the plain implementation of
/// [`PageSource`].
///
/// Serializes to/from a JSON interchange format:
///
/// ```json
/// {"pages": [{"width": 612.0, "height": 792.0, "text": "...",
///             "chars": [{"c": "#", "x": 36.0, "y": 20.0}]}]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextDocument {
    /// Document pages in order
    pub pages: Vec<Page>,
}

impl TextDocument {
    /// Wrap a list of pages.
    pub fn new(pages: Vec<Page>) -> Self {
        TextDocument { pages }
    }

    /// Parse the JSON interchange format.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the JSON interchange format from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }
}

impl PageSource for TextDocument {
    fn pages(&self) -> &[Page] {
        &self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_synthesizes_chars() {
        let page = Page::from_text("#1 Women\n1 GTCH A");
        assert_eq!(page.text, "#1 Women\n1 GTCH A");
        // One char per non-newline character
        assert_eq!(page.chars.len(), "#1 Women".len() + "1 GTCH A".len());
        // Second line sits below the first
        let first = page.chars[0];
        let last = *page.chars.last().unwrap();
        assert!(last.y > first.y);
    }

    #[test]
    fn test_from_columns_offsets() {
        let page = Page::from_columns(600.0, 800.0, &[(30.0, "left"), (330.0, "right")]);
        assert!(page.chars.iter().any(|c| c.x >= 330.0));
        assert!(page.chars.iter().any(|c| c.x < 100.0));
        assert_eq!(page.text, "left\nright");
    }

    #[test]
    fn test_json_round_trip() {
        let doc = TextDocument::new(vec![Page::from_text("Event 1 Women 50 Yard Freestyle")]);
        let json = serde_json::to_string(&doc).unwrap();
        let back = TextDocument::from_json(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(TextDocument::from_json("{not json").is_err());
    }
}
