//! Classification options and configuration.

/// Which family of heuristics to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Generic two-column papers
    #[default]
    Generic,
    /// IEEE-style papers with Roman-numeral sections and `[n]` references
    Ieee,
}

/// Options for structure classification.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Heuristics family
    pub dialect: Dialect,

    /// Whether the "Abstract" label match ignores case
    pub abstract_case_insensitive: bool,

    /// Spans shorter than this containing "Abstract" are treated as labels
    pub abstract_label_max_len: usize,

    /// Body-size uppercase spans shorter than this are headers
    pub uppercase_header_max_len: usize,

    /// Patterns (anchored at start) that open a new bibliography entry
    pub reference_patterns: Vec<String>,
}

impl ClassifyOptions {
    /// Create new classify options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options tuned for a dialect.
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Generic => Self {
                dialect,
                abstract_case_insensitive: false,
                abstract_label_max_len: 20,
                uppercase_header_max_len: 50,
                reference_patterns: vec![r"\[\d+\]".to_string(), r"\d+\.".to_string()],
            },
            Dialect::Ieee => Self {
                dialect,
                abstract_case_insensitive: true,
                abstract_label_max_len: 20,
                uppercase_header_max_len: 60,
                reference_patterns: vec![r"\[\d+\]".to_string()],
            },
        }
    }

    /// IEEE dialect defaults.
    pub fn ieee() -> Self {
        Self::for_dialect(Dialect::Ieee)
    }

    /// Set the abstract label length threshold.
    pub fn with_abstract_label_max_len(mut self, len: usize) -> Self {
        self.abstract_label_max_len = len;
        self
    }

    /// Set the uppercase header length bound.
    pub fn with_uppercase_header_max_len(mut self, len: usize) -> Self {
        self.uppercase_header_max_len = len;
        self
    }

    /// Replace the bibliography entry patterns.
    pub fn with_reference_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reference_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self::for_dialect(Dialect::Generic)
    }
}
