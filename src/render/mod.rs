//! Rendering module for converting document models to output formats.

mod escape;
mod json;
mod latex;
mod options;
mod template;

pub use escape::{escape_latex, needs_escaping, RESERVED_CHARS};
pub use json::{to_json, JsonFormat};
pub use latex::{to_latex, LatexRenderer};
pub use options::{RenderOptions, TemplateStyle};
pub use template::{Placeholder, Template, GENERIC_TEMPLATE, IEEE_TEMPLATE};
