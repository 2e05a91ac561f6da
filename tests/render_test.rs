//! Integration tests for escaping, templates and the end-to-end pipeline.

use paper2tex::render::{escape_latex, to_latex, Placeholder, GENERIC_TEMPLATE, IEEE_TEMPLATE};
use paper2tex::{
    convert_spans, ConvertOptions, Dialect, DocumentModel, Error, JsonFormat, PaperConverter,
    RenderOptions, SpanRecord, Template, TemplateStyle,
};

#[test]
fn test_escape_reserved_characters() {
    let cases = [
        ("&", r"\&"),
        ("%", r"\%"),
        ("$", r"\$"),
        ("#", r"\#"),
        ("_", r"\_"),
        ("{", r"\{"),
        ("}", r"\}"),
        ("~", r"\textasciitilde{}"),
        ("^", r"\textasciicircum{}"),
        ("\\", r"\textbackslash{}"),
    ];
    for (input, expected) in cases {
        assert_eq!(escape_latex(input), expected, "escaping {:?}", input);
    }
}

#[test]
fn test_escape_leaves_plain_text_alone() {
    let plain = "Plain text 123 with\ttabs and\nnewlines";
    assert_eq!(escape_latex(plain), plain);
    assert_eq!(escape_latex(&escape_latex(plain)), plain);
}

#[test]
fn test_backslash_is_escaped_once() {
    assert_eq!(escape_latex(r"\&"), r"\textbackslash{}\&");
}

#[test]
fn test_builtin_templates_have_every_placeholder_once() {
    for source in [GENERIC_TEMPLATE, IEEE_TEMPLATE] {
        for placeholder in Placeholder::ALL {
            assert_eq!(source.matches(placeholder.token()).count(), 1);
        }
    }
}

#[test]
fn test_title_only_model_renders_cleanly() {
    for style in [TemplateStyle::Generic, TemplateStyle::Ieee] {
        let options = RenderOptions::new().with_style(style);
        let output = to_latex(&DocumentModel::with_title("T"), &options).unwrap();
        assert!(!output.contains("VAR_"));
        assert!(output.contains(r"\begin{document}"));
    }
}

#[test]
fn test_custom_template_round_trip() {
    let template = Template::parse("%VAR_TITLE%\n%VAR_ABSTRACT%\n%VAR_BODY%\n%VAR_REFERENCES%").unwrap();
    let model = DocumentModel::new("t", "a", "b", "r");
    assert_eq!(template.render(&model), "%t%\n%a%\n%b%\n%r%");
}

#[test]
fn test_custom_template_missing_placeholder_fails_fast() {
    let options = ConvertOptions::new()
        .with_render_options(RenderOptions::new().with_template("VAR_TITLE VAR_BODY VAR_REFERENCES"));

    match PaperConverter::new(&options) {
        Err(Error::MalformedTemplate { placeholder, count }) => {
            assert_eq!(placeholder, "VAR_ABSTRACT");
            assert_eq!(count, 0);
        }
        other => panic!("expected MalformedTemplate, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_end_to_end_ieee_paper() {
    let spans = vec![
        SpanRecord::sized("Fast 100% Inference", 22.0),
        SpanRecord::sized("Abstract—We make inference fast.", 9.0),
        SpanRecord::sized("I. INTRODUCTION", 11.0),
        SpanRecord::sized("Inference is slow.", 9.0),
        SpanRecord::sized("We fix it.", 9.0),
        SpanRecord::sized("II. METHOD", 11.0),
        SpanRecord::sized("We cache things.", 9.0),
        SpanRecord::sized("REFERENCES", 11.0),
        SpanRecord::sized("[1] A. Author, Caching, 1999.", 8.0),
    ];

    let latex = convert_spans(&spans, &ConvertOptions::new().with_dialect(Dialect::Ieee)).unwrap();

    assert!(latex.contains(r"\renewcommand{\thesection}{\Roman{section}}"));
    assert!(latex.contains(r"\huge\bfseries Fast 100\% Inference"));
    assert!(latex.contains(r"\textbf{\textit{Abstract}---} We make inference fast."));
    assert!(latex.contains("\\section{INTRODUCTION}\nInference is slow. We fix it. "));
    assert!(latex.contains("\\section{METHOD}\nWe cache things. "));
    assert!(latex.contains("\\bibitem{ref1} [1] A. Author, Caching, 1999."));
    assert!(!latex.contains("VAR_"));
}

#[test]
fn test_json_output_uses_abstract_key() {
    let converter = PaperConverter::new(&ConvertOptions::default()).unwrap();
    let result = converter
        .convert_spans(&[SpanRecord::sized("Title", 20.0)])
        .unwrap();

    let json = result.to_json(JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["title"], "Title");
    assert_eq!(value["abstract"], "");
}
