//! Rendering options and configuration.

use std::path::Path;

use crate::error::Result;
use crate::parser::Dialect;

use super::Template;

/// Built-in LaTeX template style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateStyle {
    /// Two-column article with arabic section numbers
    #[default]
    Generic,
    /// IEEE-like layout with Roman-numeral sections and Times font
    Ieee,
}

impl From<Dialect> for TemplateStyle {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Generic => TemplateStyle::Generic,
            Dialect::Ieee => TemplateStyle::Ieee,
        }
    }
}

/// Options for rendering a document model.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Built-in template style
    pub style: TemplateStyle,

    /// Custom template text; overrides `style` when set
    pub custom_template: Option<String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template style.
    pub fn with_style(mut self, style: TemplateStyle) -> Self {
        self.style = style;
        self
    }

    /// Use custom template text.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.custom_template = Some(template.into());
        self
    }

    /// Load custom template text from a file.
    pub fn with_template_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.with_template(text))
    }

    /// Build and validate the template these options select.
    pub fn template(&self) -> Result<Template> {
        match self.custom_template {
            Some(ref text) => Template::parse(text.clone()),
            None => Template::builtin(self.style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new().with_style(TemplateStyle::Ieee);
        assert_eq!(options.style, TemplateStyle::Ieee);
        assert!(options.custom_template.is_none());

        let options = options.with_template("VAR_TITLE VAR_ABSTRACT VAR_BODY VAR_REFERENCES");
        assert!(options.custom_template.is_some());
        assert!(options.template().is_ok());
    }

    #[test]
    fn test_style_from_dialect() {
        assert_eq!(TemplateStyle::from(Dialect::Ieee), TemplateStyle::Ieee);
        assert_eq!(TemplateStyle::from(Dialect::Generic), TemplateStyle::Generic);
    }

    #[test]
    fn test_custom_template_is_validated() {
        let options = RenderOptions::new().with_template("VAR_TITLE only");
        assert!(options.template().is_err());
    }
}
