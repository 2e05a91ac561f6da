//! Document model types for paper structure inference.
//!
//! `SpanRecord` is the input contract from the external extractor;
//! `DocumentModel` is what the classifier hands to the renderer.

mod document;
mod span;

pub use document::{ClassificationStats, DocumentModel, UNKNOWN_TITLE};
pub use span::SpanRecord;
