//! Span file loaders.
//!
//! The PDF extractor runs outside this crate and hands over spans as JSON.
//! Loaders apply the extractor contract on the way in: text is trimmed and
//! NFC-normalized, and spans with fewer than two characters or a non-finite
//! size are dropped.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::SpanRecord;

/// A loader for one span file format.
///
/// Implement this trait to accept another extractor's output.
pub trait SpanSource: Send + Sync {
    /// Supported file extensions, lowercase without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Name of this source.
    fn name(&self) -> &str;

    /// Decode spans from file content. Returns raw spans, unfiltered.
    fn parse(&self, content: &str) -> Result<Vec<SpanRecord>>;

    /// Load, normalize and filter the spans of a file.
    fn load(&self, path: &Path) -> Result<Vec<SpanRecord>> {
        let content = fs::read_to_string(path)?;
        let raw = self.parse(&content)?;
        let total = raw.len();
        let spans = sanitize(raw);
        log::debug!(
            "{}: kept {} of {} spans from {}",
            self.name(),
            spans.len(),
            total,
            path.display()
        );
        Ok(spans)
    }

    /// Check if this source supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Normalize span text and drop spans that break the extractor contract.
pub fn sanitize(spans: Vec<SpanRecord>) -> Vec<SpanRecord> {
    spans
        .into_iter()
        .map(SpanRecord::normalized)
        .filter(SpanRecord::is_usable)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpanFile {
    List(Vec<SpanRecord>),
    Wrapped { spans: Vec<SpanRecord> },
}

/// JSON span files: an array of spans, or an object with a `spans` array.
#[derive(Debug, Clone, Default)]
pub struct JsonSpanSource {
    _private: (),
}

impl JsonSpanSource {
    /// Create a new JSON span source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl SpanSource for JsonSpanSource {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn parse(&self, content: &str) -> Result<Vec<SpanRecord>> {
        let file: SpanFile = serde_json::from_str(content)?;
        Ok(match file {
            SpanFile::List(spans) => spans,
            SpanFile::Wrapped { spans } => spans,
        })
    }
}

/// JSON Lines span files: one span object per line.
#[derive(Debug, Clone, Default)]
pub struct JsonLinesSpanSource {
    _private: (),
}

impl JsonLinesSpanSource {
    /// Create a new JSON Lines span source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl SpanSource for JsonLinesSpanSource {
    fn supported_extensions(&self) -> &[&str] {
        &["jsonl", "ndjson"]
    }

    fn name(&self) -> &str {
        "jsonl"
    }

    fn parse(&self, content: &str) -> Result<Vec<SpanRecord>> {
        let mut spans = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let span = serde_json::from_str(line).map_err(|e| Error::SpanFormat {
                line: Some(i + 1),
                message: e.to_string(),
            })?;
            spans.push(span);
        }
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        let source = JsonSpanSource::new();
        let spans = source
            .parse(r#"[{"text": "Title", "font_size": 20.0}, {"text": "Body", "size": 10}]"#)
            .unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].font_size, 10.0);
    }

    #[test]
    fn test_json_wrapped() {
        let source = JsonSpanSource::new();
        let spans = source
            .parse(r#"{"spans": [{"text": "Title", "font_size": 20.0, "page": 2}]}"#)
            .unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].page, 2);
    }

    #[test]
    fn test_json_invalid() {
        let source = JsonSpanSource::new();
        let result = source.parse(r#"{"not_spans": 1}"#);
        assert!(matches!(result, Err(Error::SpanFormat { line: None, .. })));
    }

    #[test]
    fn test_jsonl_reports_line() {
        let source = JsonLinesSpanSource::new();
        let content = "{\"text\": \"ok\", \"font_size\": 10}\n\n{broken\n";
        let result = source.parse(content);
        assert!(matches!(result, Err(Error::SpanFormat { line: Some(3), .. })));
    }

    #[test]
    fn test_jsonl_skips_blank_lines() {
        let source = JsonLinesSpanSource::new();
        let content = "\n{\"text\": \"one\", \"font_size\": 10}\n   \n{\"text\": \"two\", \"font_size\": 12}\n";
        let spans = source.parse(content).unwrap();
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_sanitize_applies_contract() {
        let spans = vec![
            SpanRecord::sized("  Kept  ", 10.0),
            SpanRecord::sized("x", 10.0),
            SpanRecord::sized("   ", 10.0),
            SpanRecord::sized("NaN size", f32::NAN),
        ];
        let kept = sanitize(spans);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "Kept");
    }

    #[test]
    fn test_extension_matching() {
        let source = JsonLinesSpanSource::new();
        assert!(source.supports_extension("JSONL"));
        assert!(source.supports_extension("ndjson"));
        assert!(!source.supports_extension("json"));
    }
}
