//! LaTeX document templates with exactly-once placeholder substitution.

use std::ops::Range;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::DocumentModel;

use super::TemplateStyle;

/// Two-column article skeleton.
pub const GENERIC_TEMPLATE: &str = r"\documentclass[10pt,twocolumn]{article}
\usepackage[margin=1.6cm]{geometry}
\setlength{\columnsep}{22pt}
\usepackage{microtype}
\usepackage[T1]{fontenc}
\usepackage{lmodern}
\usepackage{graphicx}
\usepackage{amsmath,amssymb}
\usepackage{cite}
\usepackage{titlesec}
\usepackage{authblk}

% Section formatting
\titleformat{\section}{\normalfont\bfseries\large}{\thesection.}{0.5em}{}
\titlespacing*{\section}{0pt}{10pt}{6pt}

\title{\vspace{-8pt}VAR_TITLE\vspace{-6pt}}
\author{Converted from PDF}
\affil{Automated Extraction}
\date{}

\begin{document}

\twocolumn[
  \maketitle
  \begin{center}
    \vspace{-6pt}
    \begin{minipage}{0.9\textwidth}
      \begin{abstract}
        VAR_ABSTRACT
      \end{abstract}
    \end{minipage}
    \vspace{8pt}
  \end{center}
]

% -------------------- Main Content --------------------
VAR_BODY

% -------------------- References --------------------
\begin{thebibliography}{99}
VAR_REFERENCES
\end{thebibliography}

\end{document}
";

/// IEEE-like skeleton with Roman-numeral section numbering.
pub const IEEE_TEMPLATE: &str = r"\documentclass[10pt,twocolumn]{article}

% -------------------- IEEE-Like Styling --------------------
\usepackage[margin=1.6cm]{geometry}
\setlength{\columnsep}{20pt}
\usepackage{times}
\usepackage[T1]{fontenc}
\usepackage{graphicx}
\usepackage{amsmath,amssymb}
\usepackage{cite}
\usepackage{titlesec}
\usepackage{authblk}

% Section formatting: Roman numerals (I, II, III)
\renewcommand{\thesection}{\Roman{section}}
\titleformat{\section}{\normalfont\bfseries\large\centering}{\thesection.}{0.5em}{}
\titlespacing*{\section}{0pt}{12pt}{6pt}

\title{\vspace{-10pt}\huge\bfseries VAR_TITLE \vspace{-6pt}}
\author{\textit{Converted Author Placeholder}}
\date{}

\begin{document}

\twocolumn[
  \maketitle
  \begin{center}
    \vspace{-6pt}
    \begin{minipage}{0.9\textwidth}
      \textbf{\textit{Abstract}---} VAR_ABSTRACT
    \end{minipage}
    \vspace{12pt}
  \end{center}
]

% -------------------- Main Content --------------------
VAR_BODY

% -------------------- References --------------------
\begin{thebibliography}{99}
VAR_REFERENCES
\end{thebibliography}

\end{document}
";

/// A substitution slot in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `VAR_TITLE`
    Title,
    /// `VAR_ABSTRACT`
    Abstract,
    /// `VAR_BODY`
    Body,
    /// `VAR_REFERENCES`
    References,
}

impl Placeholder {
    /// All placeholders, in model field order.
    pub const ALL: [Placeholder; 4] = [
        Placeholder::Title,
        Placeholder::Abstract,
        Placeholder::Body,
        Placeholder::References,
    ];

    /// The literal token in template text.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Title => "VAR_TITLE",
            Placeholder::Abstract => "VAR_ABSTRACT",
            Placeholder::Body => "VAR_BODY",
            Placeholder::References => "VAR_REFERENCES",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }

    fn value(self, model: &DocumentModel) -> &str {
        match self {
            Placeholder::Title => &model.title,
            Placeholder::Abstract => &model.abstract_text,
            Placeholder::Body => &model.body,
            Placeholder::References => &model.references,
        }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(Range<usize>),
    Slot(Placeholder),
}

/// A validated template, pre-split into literal text and slots.
///
/// Field values are spliced between literal segments, so text inside a
/// field is never scanned for placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text, requiring each placeholder exactly once.
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let token_re = Regex::new(r"VAR_(?:TITLE|ABSTRACT|BODY|REFERENCES)")?;

        let mut segments = Vec::new();
        let mut counts = [0usize; 4];
        let mut cursor = 0;

        for m in token_re.find_iter(&source) {
            let Some(placeholder) = Placeholder::from_token(m.as_str()) else {
                continue;
            };
            if m.start() > cursor {
                segments.push(Segment::Literal(cursor..m.start()));
            }
            segments.push(Segment::Slot(placeholder));
            counts[placeholder as usize] += 1;
            cursor = m.end();
        }
        if cursor < source.len() {
            segments.push(Segment::Literal(cursor..source.len()));
        }

        for placeholder in Placeholder::ALL {
            let count = counts[placeholder as usize];
            if count != 1 {
                return Err(Error::MalformedTemplate {
                    placeholder: placeholder.token(),
                    count,
                });
            }
        }

        Ok(Self { source, segments })
    }

    /// Load and validate one of the built-in templates.
    pub fn builtin(style: TemplateStyle) -> Result<Self> {
        match style {
            TemplateStyle::Generic => Self::parse(GENERIC_TEMPLATE),
            TemplateStyle::Ieee => Self::parse(IEEE_TEMPLATE),
        }
    }

    /// The raw template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute the model fields into the template.
    pub fn render(&self, model: &DocumentModel) -> String {
        let extra: usize = Placeholder::ALL.iter().map(|p| p.value(model).len()).sum();
        let mut out = String::with_capacity(self.source.len() + extra);
        for segment in &self.segments {
            match segment {
                Segment::Literal(range) => out.push_str(&self.source[range.clone()]),
                Segment::Slot(placeholder) => out.push_str(placeholder.value(model)),
            }
        }
        out
    }
}
