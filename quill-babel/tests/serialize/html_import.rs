//! Serializing HTML that did not come from the renderer.

use quill_babel::{html_to_markdown, serialize, Conversion, Node, SerializeOptions, Serializer};

#[test]
fn test_foreign_markup_maps_by_tag() {
    let html = r#"
        <div class="editor">
          <h2 style="color:red">Notes</h2>
          <p>Some <b>bold</b>, <i>italic</i> and <a href="https://e.com">a link</a>.</p>
          <ol start="4"><li>four</li><li>five</li></ol>
        </div>"#;
    assert_eq!(
        html_to_markdown(html),
        "## Notes\n\nSome **bold**, *italic* and [a link](https://e.com).\n\n1. four\n2. five"
    );
}

#[test]
fn test_unknown_tags_degrade_to_text() {
    let html = "<custom-widget><span>inner</span> text</custom-widget><script>var x = 1;</script>";
    assert_eq!(html_to_markdown(html), "inner text");
}

#[test]
fn test_line_break_inside_paragraph() {
    assert_eq!(html_to_markdown("<p>one<br>two</p>"), "one\ntwo");
}

#[test]
fn test_code_block_language_from_lang_class() {
    let html = "<pre><code class=\"lang-js\">let a = 1;\n\n\n\nlet b = 2;</code></pre><p>x</p>";
    assert_eq!(
        html_to_markdown(html),
        "```js\nlet a = 1;\n\n\n\nlet b = 2;\n```\n\nx"
    );
}

#[test]
fn test_blank_runs_collapse_outside_code() {
    let html = "<p>a</p><div><div></div></div><p>b</p>";
    assert_eq!(html_to_markdown(html), "a\n\nb");
}

#[test]
fn test_chart_error_block_becomes_plain_fence() {
    let html = "<div data-type=\"chart-error\" data-content=\"%7Bbad\"><p>Invalid chart data</p><pre><code>{bad</code></pre></div>";
    assert_eq!(html_to_markdown(html), "```\n{bad\n```");
}

#[test]
fn test_card_placeholder_without_directive_is_dropped() {
    let html = "<p>keep</p><div data-type=\"card\">__CARD_PLACEHOLDER_3__</div>";
    assert_eq!(html_to_markdown(html), "keep");
}

#[test]
fn test_serializer_options() {
    let serializer = Serializer::new(SerializeOptions {
        bullet_marker: '+',
        emphasis_marker: '_',
    });
    let out = serializer.serialize_html("<ul><li><em>a</em></li><li>b</li></ul>");
    assert_eq!(out, Conversion::Converted("+ _a_\n+ b".to_string()));
}

#[test]
fn test_serialize_node_tree_directly() {
    let tree = Node::Container(vec![
        Node::Heading {
            level: 1,
            children: vec![Node::Text("Doc".to_string())],
        },
        Node::UnorderedList(vec![
            Node::ListItem(vec![Node::InlineCode("x".to_string())]),
            Node::ListItem(vec![Node::Link {
                href: "u".to_string(),
                children: vec![Node::Strong(vec![Node::Text("y".to_string())])],
            }]),
        ]),
    ]);
    assert_eq!(serialize(&tree), "# Doc\n\n- `x`\n- [**y**](u)");
}

#[test]
fn test_malformed_html_never_panics() {
    let inputs = [
        "",
        "<",
        "</p></p></div>",
        "<p><b>unclosed <table><tr><td>x",
        "<table></table>",
        "<table><tr></tr></table>",
        "<div data-type=\"chart\"></div>",
        "<div data-type=\"chart\" data-chart-type=\"bar\" data-chart-data=\"%FF%FE\"></div>",
        "<pre>",
        "<!DOCTYPE html><html><head><title>t</title></head></html>",
        "<a>no href</a>",
        "<h7>not a heading</h7>",
    ];
    for input in inputs {
        let out = Serializer::default().serialize_html(input);
        assert!(!out.is_fallback(), "fallback for {input:?}");
    }
}

#[test]
fn test_deeply_nested_html_keeps_its_text() {
    let n = 3_000;
    let divs = format!("{}x{}", "<div>".repeat(n), "</div>".repeat(n));
    assert_eq!(html_to_markdown(&divs), "x");

    let spans = format!("<p>a {}b{} c</p>", "<span>".repeat(n), "</span>".repeat(n));
    assert_eq!(html_to_markdown(&spans), "a b c");

    let lists = format!("{}item{}", "<ul><li>".repeat(1_000), "</li></ul>".repeat(1_000));
    let out = Serializer::default().serialize_html(&lists);
    assert!(!out.is_fallback());
    assert!(out.text().contains("item"));
}

#[test]
fn test_deep_node_tree_serializes() {
    let mut node = Node::Text("leaf".to_string());
    for _ in 0..1_000 {
        node = Node::Container(vec![Node::Strong(vec![node])]);
    }
    let out = Serializer::default().serialize(&node);
    assert!(!out.is_fallback());
    assert!(out.text().contains("leaf"));
}
