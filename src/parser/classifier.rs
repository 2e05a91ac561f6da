//! Single-pass structure inference over a span stream.
//!
//! The classifier walks the spans once, in order, carrying a
//! [`ClassifierState`]. Each span is first assigned a [`SpanClass`] by an
//! ordered set of rules (first match wins) and then routed according to
//! that class and the current state.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{ClassificationStats, DocumentModel, SpanRecord, UNKNOWN_TITLE};
use crate::render::escape_latex;

use super::{ClassifyOptions, HeaderNormalizer, SizeProfile};

/// Section of the paper the pass is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClassifierState {
    /// Before the abstract: title, authors, affiliations
    #[default]
    Preamble,
    /// Inside the abstract
    Abstract,
    /// Inside the main body
    Body,
    /// Inside the bibliography; absorbing
    References,
}

/// What a single span was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanClass<'a> {
    /// Part of the title
    Title,
    /// Opens the abstract; carries inline abstract text after the label
    AbstractStart {
        /// Text following an inline "Abstract—" label (may be empty)
        remainder: &'a str,
    },
    /// The bibliography heading
    ReferencesStart,
    /// A section header
    Header,
    /// Ordinary content for the current state
    Content,
}

/// Result of classifying one document.
#[derive(Debug, Clone)]
pub struct Classification {
    /// The inferred document model
    pub model: DocumentModel,
    /// Font size profile the pass was driven by
    pub profile: SizeProfile,
    /// State the pass ended in
    pub final_state: ClassifierState,
    /// Counters gathered during the pass
    pub stats: ClassificationStats,
}

/// Compiled patterns used by the rules.
#[derive(Debug, Clone)]
struct Patterns {
    abstract_label: Regex,
    roman_header: Regex,
    reference_entry: Option<Regex>,
}

impl Patterns {
    fn compile(options: &ClassifyOptions) -> Result<Self> {
        let reference_entry = if options.reference_patterns.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = options
                .reference_patterns
                .iter()
                .map(|p| format!("(?:{})", p))
                .collect();
            Some(Regex::new(&format!("^(?:{})", alternatives.join("|")))?)
        };

        Ok(Self {
            abstract_label: Regex::new(r"(?i)^abstract\s*[-–—]?\s*")?,
            roman_header: Regex::new(r"^[IVX]+\.\s+[A-Z\s]+$")?,
            reference_entry,
        })
    }
}

/// Append-only accumulators owned by one pass.
#[derive(Debug, Default)]
struct Accumulators {
    title: Vec<String>,
    abstract_parts: Vec<String>,
    body: String,
    references: String,
}

impl Accumulators {
    fn into_model(self) -> DocumentModel {
        let title = if self.title.is_empty() {
            UNKNOWN_TITLE.to_string()
        } else {
            self.title.join(" ")
        };
        DocumentModel::new(title, self.abstract_parts.join(" "), self.body, self.references)
    }
}

/// Infers title, abstract, sections and references from font-annotated spans.
#[derive(Debug, Clone)]
pub struct StructureClassifier {
    options: ClassifyOptions,
    patterns: Patterns,
    normalizer: HeaderNormalizer,
}

impl StructureClassifier {
    /// Create a classifier, compiling the configured patterns.
    pub fn new(options: ClassifyOptions) -> Result<Self> {
        let patterns = Patterns::compile(&options)?;
        Ok(Self {
            options,
            patterns,
            normalizer: HeaderNormalizer::new()?,
        })
    }

    /// The options this classifier was built with.
    pub fn options(&self) -> &ClassifyOptions {
        &self.options
    }

    /// Classify a document.
    ///
    /// Fails with [`crate::Error::EmptyDocument`] when `spans` is empty;
    /// every other input degrades to defaults.
    pub fn classify(&self, spans: &[SpanRecord]) -> Result<Classification> {
        let profile = SizeProfile::from_spans(spans)?;
        Ok(self.classify_with_profile(spans, profile))
    }

    /// Classify a document against a precomputed size profile.
    pub fn classify_with_profile(
        &self,
        spans: &[SpanRecord],
        profile: SizeProfile,
    ) -> Classification {
        let mut state = ClassifierState::Preamble;
        let mut acc = Accumulators::default();
        let mut stats = ClassificationStats::new();

        for span in spans {
            stats.span_count += 1;
            let class = self.classify_span(span, state, &profile);
            log::trace!("{:?} in {:?}: {:?}", span.text, state, class);

            match class {
                SpanClass::Title => {
                    acc.title.push(escape_latex(&span.text));
                    stats.title_spans += 1;
                }
                SpanClass::AbstractStart { remainder } => {
                    state = ClassifierState::Abstract;
                    if !remainder.is_empty() {
                        acc.abstract_parts.push(escape_latex(remainder));
                        stats.abstract_spans += 1;
                    }
                }
                SpanClass::ReferencesStart => {
                    state = ClassifierState::References;
                }
                SpanClass::Header => {
                    state = ClassifierState::Body;
                    let escaped = escape_latex(&span.text);
                    let heading = self.normalizer.normalize(&escaped);
                    acc.body.push_str("\n\\section{");
                    acc.body.push_str(heading);
                    acc.body.push_str("}\n");
                    stats.section_count += 1;
                }
                SpanClass::Content => self.allocate(span, state, &mut acc, &mut stats),
            }
        }

        log::debug!(
            "Classified {} spans: {} title, {} sections, {} references, ended in {:?}",
            stats.span_count,
            stats.title_spans,
            stats.section_count,
            stats.reference_entries,
            state
        );

        Classification {
            model: acc.into_model(),
            profile,
            final_state: state,
            stats,
        }
    }

    /// Apply the rules in priority order; the first that matches wins.
    pub fn classify_span<'a>(
        &self,
        span: &'a SpanRecord,
        state: ClassifierState,
        profile: &SizeProfile,
    ) -> SpanClass<'a> {
        let text = span.text.as_str();

        if state == ClassifierState::Preamble && profile.is_max(span.font_size) {
            return SpanClass::Title;
        }

        if state != ClassifierState::References {
            if let Some(remainder) = self.abstract_start(text) {
                return SpanClass::AbstractStart { remainder };
            }
        }

        if text.to_lowercase().contains("references") && span.font_size > profile.body_size {
            return SpanClass::ReferencesStart;
        }

        if state != ClassifierState::References && self.is_header(span, profile) {
            return SpanClass::Header;
        }

        SpanClass::Content
    }

    /// Returns the inline remainder if the span opens the abstract.
    fn abstract_start<'a>(&self, text: &'a str) -> Option<&'a str> {
        let (contains, anchored) = if self.options.abstract_case_insensitive {
            let lower = text.to_lowercase();
            (lower.contains("abstract"), lower.starts_with("abstract"))
        } else {
            (text.contains("Abstract"), text.starts_with("Abstract"))
        };

        if !contains {
            return None;
        }
        let short = text.chars().count() < self.options.abstract_label_max_len;
        if !short && !anchored {
            return None;
        }

        let remainder = if anchored {
            match self.patterns.abstract_label.find(text) {
                Some(m) => text[m.end()..].trim(),
                None => "",
            }
        } else {
            ""
        };
        Some(remainder)
    }

    fn is_header(&self, span: &SpanRecord, profile: &SizeProfile) -> bool {
        let text = span.text.as_str();
        if self.patterns.roman_header.is_match(text) {
            return true;
        }
        if span.font_size > profile.body_size {
            return true;
        }
        span.font_size == profile.body_size
            && is_uppercase_text(text)
            && text.chars().count() < self.options.uppercase_header_max_len
    }

    fn allocate(
        &self,
        span: &SpanRecord,
        state: ClassifierState,
        acc: &mut Accumulators,
        stats: &mut ClassificationStats,
    ) {
        match state {
            ClassifierState::Preamble => {
                stats.discarded_spans += 1;
            }
            ClassifierState::Abstract => {
                acc.abstract_parts.push(escape_latex(&span.text));
                stats.abstract_spans += 1;
            }
            ClassifierState::Body => {
                acc.body.push_str(&escape_latex(&span.text));
                acc.body.push(' ');
                stats.body_spans += 1;
            }
            ClassifierState::References => {
                let clean = escape_latex(&span.text);
                if self.starts_reference_entry(&span.text) {
                    stats.reference_entries += 1;
                    acc.references.push_str(&format!(
                        "\n\\bibitem{{ref{}}} {}",
                        stats.reference_entries, clean
                    ));
                } else {
                    acc.references.push_str(&clean);
                    stats.reference_continuations += 1;
                }
            }
        }
    }

    fn starts_reference_entry(&self, text: &str) -> bool {
        self.patterns
            .reference_entry
            .as_ref()
            .is_some_and(|re| re.is_match(text))
    }
}

/// Uppercase in the sense of "has cased letters and none are lowercase".
fn is_uppercase_text(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}
