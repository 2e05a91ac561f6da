//! # paper2tex
//!
//! Structure inference for academic papers, from font-annotated text spans
//! to a compilable LaTeX document.
//!
//! A PDF extractor produces spans (text, font size, font name, position).
//! This library profiles the font sizes, walks the spans once with a small
//! state machine to recover the title, abstract, section headers and
//! bibliography, and renders the result into a LaTeX template.
//!
//! ## Quick Start
//!
//! ```no_run
//! use paper2tex::{convert_file, ConvertOptions};
//!
//! fn main() -> paper2tex::Result<()> {
//!     let latex = convert_file("paper.json", &ConvertOptions::default())?;
//!     std::fs::write("paper.tex", latex)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Font-size profiling**: body text is the most frequent size, the title the largest
//! - **Dialects**: generic papers and IEEE-style papers with Roman-numeral sections
//! - **Templates**: built-in two-column templates or your own, validated up front
//! - **Batch conversion**: parallel per-document conversion with progress events

pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    BatchConverter, BatchOptions, BatchReport, ConvertOptions, ConvertResult, PaperConverter,
    SourceRegistry, SpanSource,
};
pub use error::{Error, Result};
pub use model::{ClassificationStats, DocumentModel, SpanRecord};
pub use parser::{
    Classification, ClassifierState, ClassifyOptions, Dialect, SizeProfile, StructureClassifier,
};
pub use render::{JsonFormat, RenderOptions, Template, TemplateStyle};

use std::path::Path;

/// Classify spans into a document model with default options.
///
/// # Example
///
/// ```
/// use paper2tex::{classify, SpanRecord};
///
/// let spans = vec![
///     SpanRecord::sized("A Study of Things", 20.0),
///     SpanRecord::sized("Some body text", 10.0),
/// ];
/// let model = classify(&spans).unwrap();
/// assert_eq!(model.title, "A Study of Things");
/// ```
pub fn classify(spans: &[SpanRecord]) -> Result<DocumentModel> {
    classify_with_options(spans, ClassifyOptions::default())
}

/// Classify spans into a document model.
pub fn classify_with_options(
    spans: &[SpanRecord],
    options: ClassifyOptions,
) -> Result<DocumentModel> {
    let classifier = StructureClassifier::new(options)?;
    Ok(classifier.classify(spans)?.model)
}

/// Convert spans to LaTeX.
///
/// # Example
///
/// ```
/// use paper2tex::{convert_spans, ConvertOptions, Dialect, SpanRecord};
///
/// let spans = vec![
///     SpanRecord::sized("Title", 20.0),
///     SpanRecord::sized("I. INTRODUCTION", 12.0),
///     SpanRecord::sized("Text", 10.0),
///     SpanRecord::sized("More text", 10.0),
/// ];
/// let options = ConvertOptions::new().with_dialect(Dialect::Ieee);
/// let latex = convert_spans(&spans, &options).unwrap();
/// assert!(latex.contains(r"\section{INTRODUCTION}"));
/// ```
pub fn convert_spans(spans: &[SpanRecord], options: &ConvertOptions) -> Result<String> {
    let converter = PaperConverter::new(options)?;
    Ok(converter.convert_spans(spans)?.content)
}

/// Load the usable spans of a span file (`.json`, `.jsonl`, `.ndjson`).
pub fn load_spans<P: AsRef<Path>>(path: P) -> Result<Vec<SpanRecord>> {
    SourceRegistry::with_defaults().load(path.as_ref())
}

/// Convert a span file to LaTeX.
///
/// # Example
///
/// ```no_run
/// use paper2tex::{convert_file, ConvertOptions};
///
/// let latex = convert_file("paper.jsonl", &ConvertOptions::default()).unwrap();
/// println!("{}", latex);
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<String> {
    let spans = load_spans(path)?;
    convert_spans(&spans, options)
}

/// Builder for classifying and rendering papers.
///
/// # Example
///
/// ```no_run
/// use paper2tex::{Dialect, Paper2Tex};
///
/// let result = Paper2Tex::new()
///     .with_dialect(Dialect::Ieee)
///     .with_template_file("my_template.tex")?
///     .load("paper.json")?;
/// std::fs::write("paper.tex", result.to_latex())?;
/// # Ok::<(), paper2tex::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Paper2Tex {
    options: ConvertOptions,
}

impl Paper2Tex {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the heuristics and template of a dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.options = self.options.with_dialect(dialect);
        self
    }

    /// Use custom template text.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.options.render = self.options.render.with_template(template);
        self
    }

    /// Load a custom template from a file.
    pub fn with_template_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.options.render = self.options.render.with_template_file(path)?;
        Ok(self)
    }

    /// Set the bibliography entry patterns.
    pub fn with_reference_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.classify = self.options.classify.with_reference_patterns(patterns);
        self
    }

    /// Convert a span file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<ConvertResult> {
        let spans = load_spans(path)?;
        self.convert(&spans)
    }

    /// Convert spans already in memory.
    pub fn convert(self, spans: &[SpanRecord]) -> Result<ConvertResult> {
        PaperConverter::new(&self.options)?.convert_spans(spans)
    }

    /// The options collected so far.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_single_span() {
        let model = classify(&[SpanRecord::sized("Lonely", 11.0)]).unwrap();
        assert_eq!(model.title, "Lonely");
        assert!(model.abstract_text.is_empty());
        assert!(model.body.is_empty());
        assert!(model.references.is_empty());
    }

    #[test]
    fn test_classify_empty() {
        assert!(matches!(classify(&[]), Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_builder_reference_patterns() {
        let spans = vec![
            SpanRecord::sized("Title", 20.0),
            SpanRecord::sized("References", 12.0),
            SpanRecord::sized("(1) Some entry", 10.0),
            SpanRecord::sized("continued", 10.0),
        ];
        let result = Paper2Tex::new()
            .with_reference_patterns([r"\(\d+\)"])
            .convert(&spans)
            .unwrap();
        assert_eq!(result.model.references, "\n\\bibitem{ref1} (1) Some entrycontinued");
    }

    #[test]
    fn test_builder_bad_template() {
        let result = Paper2Tex::new()
            .with_template("VAR_TITLE")
            .convert(&[SpanRecord::sized("Title", 20.0)]);
        assert!(matches!(result, Err(Error::MalformedTemplate { .. })));
    }
}
