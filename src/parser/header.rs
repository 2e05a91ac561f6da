//! Section header cleanup.

use regex::Regex;

use crate::error::Result;

/// Strips a leading Roman-numeral enumerator ("I.", "IV.") from header
/// text, since the LaTeX template numbers sections itself.
#[derive(Debug, Clone)]
pub struct HeaderNormalizer {
    enumerator: Regex,
}

impl HeaderNormalizer {
    /// Create a new header normalizer.
    pub fn new() -> Result<Self> {
        Ok(Self {
            enumerator: Regex::new(r"^[IVX]+\.\s*")?,
        })
    }

    /// Remove the enumerator prefix, if any.
    pub fn normalize<'a>(&self, text: &'a str) -> &'a str {
        match self.enumerator.find(text) {
            Some(m) => &text[m.end()..],
            None => text,
        }
    }

    /// Whether the text starts with an enumerator.
    pub fn has_enumerator(&self, text: &str) -> bool {
        self.enumerator.is_match(text)
    }
}
