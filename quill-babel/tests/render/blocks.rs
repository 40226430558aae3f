use crate::common::strip_classes;
use insta::assert_snapshot;
use quill_babel::{render, Conversion, RenderOptions, Renderer};

#[test]
fn test_heading_and_paragraph_snapshot() {
    let html = render("# Hello\n\nSome **bold** text");
    assert_snapshot!(html, @r#"
    <h1 class="md-h1">Hello</h1>
    <p class="md-paragraph">Some <strong>bold</strong> text</p>
    "#);
}

#[test]
fn test_level_three_is_not_swallowed_by_level_one() {
    let html = strip_classes(&render("### Deep\n# Top"));
    assert_eq!(html, "<h3>Deep</h3>\n<h1>Top</h1>");
}

#[test]
fn test_bold_and_italic_are_distinct() {
    let html = strip_classes(&render("**bold** and *italic*"));
    assert_eq!(html, "<p><strong>bold</strong> and <em>italic</em></p>");
}

#[test]
fn test_bold_italic_nesting() {
    let html = strip_classes(&render("***both*** and __under__ _score_"));
    assert_eq!(
        html,
        "<p><strong><em>both</em></strong> and <strong>under</strong> <em>score</em></p>"
    );
}

#[test]
fn test_code_span_content_is_not_formatted() {
    let html = strip_classes(&render("`**not bold**` and [`x`](y)"));
    assert_eq!(
        html,
        "<p><code>**not bold**</code> and <a href=\"y\"><code>x</code></a></p>"
    );
}

#[test]
fn test_lists_group_into_one_element() {
    let html = strip_classes(&render("- a\n- b\n+ c\n\n1. x\n2. y"));
    assert_snapshot!(html, @r#"
    <ul><li>a</li><li>b</li><li>c</li></ul>
    <ol><li>x</li><li>y</li></ol>
    "#);
}

#[test]
fn test_blockquote_lines_merge() {
    let html = strip_classes(&render("> one\n> **two**"));
    assert_eq!(html, "<blockquote>one <strong>two</strong></blockquote>");
}

#[test]
fn test_fenced_code_language_class() {
    let html = render("```python\nprint('*hi*')\n```");
    assert_eq!(
        html,
        "<pre class=\"md-code-block\"><code class=\"language-python\">print('*hi*')</code></pre>"
    );
}

#[test]
fn test_horizontal_rules() {
    let html = strip_classes(&render("a\n\n***\n\n-----"));
    assert_eq!(html, "<p>a</p>\n<hr>\n<hr>");
}

#[test]
fn test_table_cells_use_cell_grammar() {
    let html = strip_classes(&render("| **Name** | Age |\n| --- | --- |\n| Ann |"));
    assert_snapshot!(html, @"<table><thead><tr><th><strong>Name</strong></th><th>Age</th></tr></thead><tbody><tr><td>Ann</td><td></td></tr></tbody></table>");
}

#[test]
fn test_frontmatter_is_stripped() {
    let html = strip_classes(&render("---\ntitle: x\n---\n# Body"));
    assert_eq!(html, "<h1>Body</h1>");
}

#[test]
fn test_unterminated_frontmatter_is_kept() {
    let html = strip_classes(&render("---\ntitle: x"));
    assert_eq!(html, "<hr>\n<p>title: x</p>");
}

#[test]
fn test_blank_line_runs_do_not_leak() {
    let html = render("\n\n\na\n\n\n\n\nb\n\n\n");
    assert!(!html.contains("\n\n"));
    assert!(!html.starts_with('\n') && !html.ends_with('\n'));
}

#[test]
fn test_options_change_classes_only() {
    let custom = Renderer::new(RenderOptions::default().with_class_prefix("doc"));
    let source = "# T\n\n- a\n\n`c`";
    let rendered = custom.render(source);
    assert!(rendered.html().contains("class=\"doc-h1\""));
    assert_eq!(strip_classes(rendered.html()), strip_classes(&render(source)));
}

#[test]
fn test_max_heading_level_is_configurable() {
    let renderer = Renderer::new(RenderOptions::default().with_max_heading_level(1));
    let rendered = renderer.render("## Two");
    assert_eq!(strip_classes(rendered.html()), "<p>## Two</p>");
}

#[test]
fn test_render_reports_conversion() {
    let rendered = Renderer::default().render("plain");
    assert_eq!(
        rendered.output,
        Conversion::Converted("<p class=\"md-paragraph\">plain</p>".to_string())
    );
}

#[test]
fn test_malformed_markdown_never_panics() {
    let inputs = [
        "",
        "```",
        "```chart",
        "```chart bar\n",
        "| | |\n|-|\n",
        "|\n|\n|",
        ":::card[",
        ":::card[x]{",
        "***",
        "**",
        "[unclosed](",
        "# ",
        "> ",
        "1.",
        "\u{0}\u{feff}é*_`[",
    ];
    for input in inputs {
        let rendered = Renderer::default().render(input);
        assert!(!rendered.output.is_fallback(), "fallback for {input:?}");
    }
}

#[test]
fn test_deeply_nested_markdown_renders() {
    let n = 3_000;
    let links = format!("{}x{}", "[".repeat(n), "](u)".repeat(n));
    let emphasis = format!("{}x{}", "*a ".repeat(n), " b*".repeat(n));
    let quotes = format!("{} deep", ">".repeat(n));

    for input in [links, emphasis, quotes] {
        let rendered = Renderer::default().render(&input);
        assert!(!rendered.output.is_fallback());
        assert!(rendered.html().contains('x') || rendered.html().contains("deep"));
    }
}
