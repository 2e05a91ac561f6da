//! Positioned, font-annotated text spans.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

fn default_page() -> u32 {
    1
}

/// One contiguous run of text sharing a font, as produced by the extractor.
///
/// Spans arrive in natural reading order per page; document order is the
/// concatenation of page orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    /// The text content
    pub text: String,
    /// Font size in points
    #[serde(alias = "size")]
    pub font_size: f32,
    /// Font name (e.g., "Times-Bold")
    #[serde(alias = "font", default)]
    pub font_name: String,
    /// X position (left edge)
    #[serde(default)]
    pub x: f32,
    /// Y position
    #[serde(default)]
    pub y: f32,
    /// Page number (1-indexed), diagnostics only
    #[serde(default = "default_page")]
    pub page: u32,
}

impl SpanRecord {
    /// Create a new span record on page 1.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        font_name: impl Into<String>,
        x: f32,
        y: f32,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: font_name.into(),
            x,
            y,
            page: 1,
        }
    }

    /// Create a span with only text and size set.
    pub fn sized(text: impl Into<String>, font_size: f32) -> Self {
        Self::new(text, font_size, String::new(), 0.0, 0.0)
    }

    /// Whether the span satisfies the extractor contract: more than one
    /// character after trimming and a finite font size.
    pub fn is_usable(&self) -> bool {
        self.font_size.is_finite() && self.text.trim().chars().count() > 1
    }

    /// Trim the text and normalize it to Unicode NFC.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.text.trim();
        self.text = trimmed.nfc().collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_filter() {
        assert!(SpanRecord::sized("Hello", 10.0).is_usable());
        assert!(!SpanRecord::sized("  a  ", 10.0).is_usable());
        assert!(!SpanRecord::sized("   ", 10.0).is_usable());
        assert!(!SpanRecord::sized("Hello", f32::NAN).is_usable());
        assert!(!SpanRecord::sized("Hello", f32::INFINITY).is_usable());
    }

    #[test]
    fn test_normalized_trims_and_composes() {
        let span = SpanRecord::sized("  Cafe\u{301}  ", 10.0).normalized();
        assert_eq!(span.text, "Caf\u{e9}");
    }

    #[test]
    fn test_deserialize_aliases() {
        let json = r#"{"text": "Intro", "size": 14.0, "font": "Times-Bold"}"#;
        let span: SpanRecord = serde_json::from_str(json).unwrap();
        assert_eq!(span.font_size, 14.0);
        assert_eq!(span.font_name, "Times-Bold");
        assert_eq!(span.page, 1);
        assert_eq!(span.x, 0.0);
    }
}
