//! Document conversion: span sources, the per-document pipeline and the
//! batch driver.
//!
//! # Example
//!
//! ```no_run
//! use paper2tex::convert::{ConvertOptions, PaperConverter, SourceRegistry};
//! use std::path::Path;
//!
//! fn main() -> paper2tex::Result<()> {
//!     let registry = SourceRegistry::with_defaults();
//!     let spans = registry.load(Path::new("paper.json"))?;
//!
//!     let converter = PaperConverter::new(&ConvertOptions::default())?;
//!     let result = converter.convert_spans(&spans)?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod batch;
mod source;

pub use batch::{
    collect_inputs, output_path_for, BatchConverter, BatchOptions, BatchReport, DocumentOutcome,
    DocumentStatus, ProgressEvent,
};
pub use source::{sanitize, JsonLinesSpanSource, JsonSpanSource, SpanSource};

use crate::error::{Error, Result};
use crate::model::{ClassificationStats, DocumentModel, SpanRecord};
use crate::parser::{ClassifierState, ClassifyOptions, Dialect, SizeProfile, StructureClassifier};
use crate::render::{self, JsonFormat, LatexRenderer, RenderOptions};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Options for converting one document.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Classification options
    pub classify: ClassifyOptions,

    /// Rendering options
    pub render: RenderOptions,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the heuristics and template of a dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.classify = ClassifyOptions::for_dialect(dialect);
        self.render = self.render.with_style(dialect.into());
        self
    }

    /// Set classification options.
    pub fn with_classify_options(mut self, options: ClassifyOptions) -> Self {
        self.classify = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }
}

/// Result of converting one document.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Rendered LaTeX
    pub content: String,

    /// The classified model
    pub model: DocumentModel,

    /// Font size profile
    pub profile: SizeProfile,

    /// State the classifier ended in
    pub final_state: ClassifierState,

    /// Classification counters
    pub stats: ClassificationStats,
}

impl ConvertResult {
    /// The rendered LaTeX.
    pub fn to_latex(&self) -> &str {
        &self.content
    }

    /// The document model as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.model, format)
    }
}

/// Classifies spans and renders them, reusing compiled patterns and the
/// validated template across documents.
#[derive(Debug, Clone)]
pub struct PaperConverter {
    classifier: StructureClassifier,
    renderer: LatexRenderer,
}

impl PaperConverter {
    /// Create a converter. Fails fast on an invalid template or pattern.
    pub fn new(options: &ConvertOptions) -> Result<Self> {
        Ok(Self {
            classifier: StructureClassifier::new(options.classify.clone())?,
            renderer: LatexRenderer::from_options(&options.render)?,
        })
    }

    /// Convert one document's spans to LaTeX.
    pub fn convert_spans(&self, spans: &[SpanRecord]) -> Result<ConvertResult> {
        let classification = self.classifier.classify(spans)?;
        let content = self.renderer.render(&classification.model);
        Ok(ConvertResult {
            content,
            model: classification.model,
            profile: classification.profile,
            final_state: classification.final_state,
            stats: classification.stats,
        })
    }
}

/// Registry of span sources keyed by file extension.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn SpanSource>>,
    by_name: HashMap<String, Arc<dyn SpanSource>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the JSON and JSON Lines sources.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonSpanSource::new()));
        registry.register(Arc::new(JsonLinesSpanSource::new()));
        registry
    }

    /// Register a source for all its supported extensions.
    pub fn register(&mut self, source: Arc<dyn SpanSource>) {
        for ext in source.supported_extensions() {
            self.sources.insert(ext.to_lowercase(), source.clone());
        }
        self.by_name.insert(source.name().to_lowercase(), source);
    }

    /// Get a source by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn SpanSource>> {
        self.sources.get(&ext.to_lowercase()).cloned()
    }

    /// Get a source by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn SpanSource>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.sources.contains_key(&ext.to_lowercase())
    }

    /// Check if a path has a supported extension.
    pub fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.supports(ext))
    }

    /// Load the spans of a file with the source matching its extension.
    pub fn load(&self, path: &Path) -> Result<Vec<SpanRecord>> {
        let source = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.get_by_extension(ext))
            .ok_or_else(|| Error::UnsupportedSource(path.to_path_buf()))?;

        source.load(path)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TemplateStyle;

    #[test]
    fn test_convert_options_dialect() {
        let options = ConvertOptions::new().with_dialect(Dialect::Ieee);
        assert_eq!(options.classify.dialect, Dialect::Ieee);
        assert_eq!(options.render.style, TemplateStyle::Ieee);
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = SourceRegistry::with_defaults();
        assert!(registry.supports("json"));
        assert!(registry.supports("JSONL"));
        assert!(!registry.supports("pdf"));
        assert!(registry.get_by_name("jsonl").is_some());
        assert!(registry.supports_path(Path::new("a/b/paper.json")));
        assert!(!registry.supports_path(Path::new("a/b/paper")));
    }

    #[test]
    fn test_registry_unsupported_path() {
        let registry = SourceRegistry::with_defaults();
        let result = registry.load(Path::new("paper.pdf"));
        assert!(matches!(result, Err(Error::UnsupportedSource(_))));
    }

    #[test]
    fn test_converter_fails_fast_on_bad_template() {
        let options = ConvertOptions::new()
            .with_render_options(RenderOptions::new().with_template("no placeholders"));
        assert!(matches!(
            PaperConverter::new(&options),
            Err(Error::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn test_convert_result_views() {
        let converter = PaperConverter::new(&ConvertOptions::default()).unwrap();
        let result = converter
            .convert_spans(&[SpanRecord::sized("Only Title", 16.0)])
            .unwrap();

        assert_eq!(result.to_latex(), result.content);
        assert!(result.to_latex().contains("Only Title"));
        let json = result.to_json(JsonFormat::Compact).unwrap();
        assert!(json.contains("\"title\":\"Only Title\""));
    }

    #[test]
    fn test_converter_empty_document() {
        let converter = PaperConverter::new(&ConvertOptions::default()).unwrap();
        assert!(matches!(
            converter.convert_spans(&[]),
            Err(Error::EmptyDocument)
        ));
    }
}
