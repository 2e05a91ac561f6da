//! Error types for paper2tex library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for paper2tex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while classifying and rendering papers.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading span files or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document has no usable spans (image-only or unreadable source).
    #[error("Document contains no usable text spans")]
    EmptyDocument,

    /// A template placeholder is missing or appears more than once.
    #[error("Malformed template: placeholder {placeholder} occurs {count} times (expected exactly 1)")]
    MalformedTemplate {
        /// The placeholder token, e.g. `VAR_TITLE`
        placeholder: &'static str,
        /// How many times the token was found
        count: usize,
    },

    /// A span file could not be decoded.
    #[error("Invalid span data{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    SpanFormat {
        /// 1-indexed line for line-oriented formats
        line: Option<usize>,
        /// Decoder message
        message: String,
    },

    /// No span source is registered for the file extension.
    #[error("Unsupported span source: {}", .0.display())]
    UnsupportedSource(PathBuf),

    /// A configured pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Another document in the same batch already writes this output file.
    #[error("Output {} is already claimed by {}", output.display(), claimed_by.display())]
    OutputConflict {
        /// The contested output path
        output: PathBuf,
        /// Source of the document that keeps the output
        claimed_by: PathBuf,
    },

    /// Error during rendering (LaTeX, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SpanFormat {
            line: None,
            message: err.to_string(),
        }
    }
}

impl Error {
    /// Whether the caller should treat this as "skip this document"
    /// rather than a failure.
    pub fn is_empty_document(&self) -> bool {
        matches!(self, Error::EmptyDocument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyDocument;
        assert_eq!(err.to_string(), "Document contains no usable text spans");

        let err = Error::MalformedTemplate {
            placeholder: "VAR_BODY",
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Malformed template: placeholder VAR_BODY occurs 2 times (expected exactly 1)"
        );
    }

    #[test]
    fn test_span_format_display() {
        let err = Error::SpanFormat {
            line: Some(3),
            message: "expected value".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid span data at line 3: expected value");

        let err = Error::SpanFormat {
            line: None,
            message: "eof".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid span data: eof");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_empty_document());
    }

    #[test]
    fn test_output_conflict_display() {
        let err = Error::OutputConflict {
            output: PathBuf::from("out/paper.tex"),
            claimed_by: PathBuf::from("in/paper.json"),
        };
        assert_eq!(
            err.to_string(),
            "Output out/paper.tex is already claimed by in/paper.json"
        );
        assert!(Error::EmptyDocument.is_empty_document());
    }
}
