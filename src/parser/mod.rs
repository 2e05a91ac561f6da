//! Structure inference: size profiling, header cleanup and span classification.

mod classifier;
mod header;
mod options;
mod profile;

pub use classifier::{Classification, ClassifierState, SpanClass, StructureClassifier};
pub use header::HeaderNormalizer;
pub use options::{ClassifyOptions, Dialect};
pub use profile::SizeProfile;
