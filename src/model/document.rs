//! Document-level types.

use serde::{Deserialize, Serialize};

/// Title used when no span qualified as a title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// The inferred structure of one paper.
///
/// All fields are already LaTeX-escaped. `body` and `references` are
/// pre-joined markup fragments containing `\section` and `\bibitem`
/// markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Paper title
    pub title: String,

    /// Abstract text (possibly empty)
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Body fragment with section markers (possibly empty)
    pub body: String,

    /// Bibliography fragment with entry markers (possibly empty)
    pub references: String,
}

impl DocumentModel {
    /// Create a model from its four fields.
    pub fn new(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        body: impl Into<String>,
        references: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            abstract_text: abstract_text.into(),
            body: body.into(),
            references: references.into(),
        }
    }

    /// Create a model with only a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self::new(title, "", "", "")
    }

    /// Whether a real title was found.
    pub fn has_title(&self) -> bool {
        self.title != UNKNOWN_TITLE
    }

    /// Number of `\section` markers in the body.
    pub fn section_count(&self) -> usize {
        self.body.matches("\\section{").count()
    }

    /// Number of `\bibitem` markers in the references.
    pub fn reference_count(&self) -> usize {
        self.references.matches("\\bibitem{").count()
    }
}

impl Default for DocumentModel {
    fn default() -> Self {
        Self::with_title(UNKNOWN_TITLE)
    }
}

/// Counters collected during one classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationStats {
    /// Total spans consumed
    pub span_count: u32,

    /// Spans merged into the title
    pub title_spans: u32,

    /// Spans appended to the abstract (labels with remainder included)
    pub abstract_spans: u32,

    /// Prose spans appended to the body
    pub body_spans: u32,

    /// Section markers emitted
    pub section_count: u32,

    /// Bibliography entries started
    pub reference_entries: u32,

    /// Continuation spans appended to a bibliography entry
    pub reference_continuations: u32,

    /// Preamble spans dropped as author/affiliation noise
    pub discarded_spans: u32,
}

impl ClassificationStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_uses_placeholder_title() {
        let model = DocumentModel::default();
        assert_eq!(model.title, UNKNOWN_TITLE);
        assert!(!model.has_title());
        assert!(model.abstract_text.is_empty());
    }

    #[test]
    fn test_marker_counts() {
        let model = DocumentModel::new(
            "T",
            "",
            "\n\\section{A}\nx \n\\section{B}\ny ",
            "\n\\bibitem{ref1} [1] A\n\\bibitem{ref2} [2] B",
        );
        assert_eq!(model.section_count(), 2);
        assert_eq!(model.reference_count(), 2);
    }

    #[test]
    fn test_abstract_serializes_under_plain_name() {
        let model = DocumentModel::new("T", "Summary", "", "");
        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains("\"abstract\":\"Summary\""));
    }
}
