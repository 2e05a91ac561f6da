//! LaTeX escaping for plain text.

/// Characters LaTeX treats as control syntax.
pub const RESERVED_CHARS: [char; 10] = ['&', '%', '$', '#', '_', '{', '}', '~', '^', '\\'];

/// Escaped form of a single character, or `None` if it passes through.
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '&' => Some(r"\&"),
        '%' => Some(r"\%"),
        '$' => Some(r"\$"),
        '#' => Some(r"\#"),
        '_' => Some(r"\_"),
        '{' => Some(r"\{"),
        '}' => Some(r"\}"),
        '~' => Some(r"\textasciitilde{}"),
        '^' => Some(r"\textasciicircum{}"),
        '\\' => Some(r"\textbackslash{}"),
        _ => None,
    }
}

/// Escape text for safe inclusion in a LaTeX document.
///
/// Each character is mapped independently in a single pass, so the
/// backslashes introduced by one replacement are never escaped again.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match escape_char(c) {
            Some(escaped) => out.push_str(escaped),
            None => out.push(c),
        }
    }
    out
}

/// Whether the text contains any reserved character.
pub fn needs_escaping(text: &str) -> bool {
    text.chars().any(|c| RESERVED_CHARS.contains(&c))
}
