//! Markdown → HTML → Markdown.

use crate::common::{roundtrip, KITCHEN_SINK};
use insta::assert_snapshot;
use quill_babel::{html_to_markdown, render, Renderer, Serializer};

#[test]
fn test_bold_and_italic_round_trip_exactly() {
    assert_eq!(roundtrip("**bold** and *italic*"), "**bold** and *italic*");
}

#[test]
fn test_chart_fence_round_trips_exactly() {
    let source = "```chart bar\n{\"a\":1}\n```";
    assert_eq!(roundtrip(source), source);
}

#[test]
fn test_chart_payload_text_is_preserved() {
    let source = "```chart scatter\n{\n  \"points\": [[1, 2], [3, 4]],\n  \"label\": \"a & b\"\n}\n```";
    assert_eq!(roundtrip(source), source);
}

#[test]
fn test_invalid_chart_comes_back_as_plain_fence() {
    let first = roundtrip("```chart bar\nnot json\n```");
    assert_eq!(first, "```\nnot json\n```");
    // and stays a plain code block afterwards
    assert_eq!(roundtrip(&first), first);
}

#[test]
fn test_code_containing_fence_lines_round_trips() {
    let source = "````\n```\ninner\n```\n````";
    assert_eq!(roundtrip(source), source);

    let nested = "````md\nbefore\n```rust\nfn x() {}\n```\n````";
    assert_eq!(roundtrip(nested), nested);
}

#[test]
fn test_card_directive_round_trips() {
    let source = ":::card[Team]{size=small}\nBody\n:::";
    assert_eq!(roundtrip(source), source);
}

#[test]
fn test_card_token_resolved_through_render_bindings() {
    let rendered = Renderer::default().render(":::card[Solo]");
    // an editor that drops data-content but keeps the token text
    let edited = "<div data-type=\"card\">__CARD_PLACEHOLDER_0__</div>";

    let markdown = Serializer::default()
        .with_bindings(rendered.placeholders.clone())
        .serialize_html(edited);
    assert_eq!(markdown.text(), ":::card[Solo]");
}

#[test]
fn test_table_round_trip_pads_short_rows() {
    let source = "| A | B |\n|---|---|\n| 1 |\n";
    assert_eq!(roundtrip(source), "| A | B |\n| --- | --- |\n| 1 |  |");
}

#[test]
fn test_kitchen_sink_normalizes_once() {
    let first = roundtrip(KITCHEN_SINK);
    assert_snapshot!(first, @r#"
    # Title

    Intro with **bold**, *italic* and `code`, plus [a link](https://example.com).

    ## Section

    - one
    - two

    1. first
    2. second

    > quoted text

    | Name | Role |
    | --- | --- |
    | **Ann** | Lead |
    | Bo |  |

    ```rust
    fn main() {}
    ```

    ```chart bar
    {"a":1}
    ```

    :::card[Team]{size=small}
    Body
    :::

    ---

    Last paragraph.
    "#);
}

#[test]
fn test_rerender_is_idempotent() {
    let sources = [
        KITCHEN_SINK,
        "* a\n+ b\n\n7. x\n9. y",
        "para\nwith lines\n\n\n\n> q1\n> q2",
        "```chart bar\n{oops\n```",
        ":::card[unterminated\n\ntext",
        "| **h** | `c` |\n|:-:|--|\n| [l](u) | x<br>y |",
    ];
    for source in sources {
        let first = roundtrip(source);
        let second = roundtrip(&first);
        assert_eq!(first, second, "not stable for {source:?}");
        assert_eq!(render(&first), render(&second));
    }
}

#[test]
fn test_html_round_trip_of_rendered_output() {
    let html = render("# T\n\n- a\n- b");
    let back = render(&html_to_markdown(&html));
    assert_eq!(html, back);
}
