//! LaTeX rendering for document models.

use crate::error::Result;
use crate::model::DocumentModel;

use super::{RenderOptions, Template};

/// Convert a document model to LaTeX.
///
/// Builds the template on every call; batch callers should create a
/// [`LatexRenderer`] once instead.
pub fn to_latex(model: &DocumentModel, options: &RenderOptions) -> Result<String> {
    let renderer = LatexRenderer::from_options(options)?;
    Ok(renderer.render(model))
}

/// LaTeX renderer over a validated template.
#[derive(Debug, Clone)]
pub struct LatexRenderer {
    template: Template,
}

impl LatexRenderer {
    /// Create a renderer for a template.
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    /// Create a renderer from options, validating the selected template.
    pub fn from_options(options: &RenderOptions) -> Result<Self> {
        Ok(Self::new(options.template()?))
    }

    /// The template in use.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Render a document model. Fields are inserted verbatim; escaping
    /// already happened during classification.
    pub fn render(&self, model: &DocumentModel) -> String {
        self.template.render(model)
    }
}
