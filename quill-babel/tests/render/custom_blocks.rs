//! Chart fences and card directives on the rendering side.

use quill_babel::{
    render, CardComponent, CardDirectiveParser, PlaceholderBinding, Renderer,
};

#[test]
fn test_chart_fence_becomes_placeholder() {
    let html = render("```chart line\n[1, 2, 3]\n```");
    assert_eq!(
        html,
        "<div class=\"md-chart\" data-type=\"chart\" data-chart-type=\"line\" data-chart-data=\"%5B1%2C%202%2C%203%5D\"></div>"
    );
}

#[test]
fn test_invalid_chart_is_an_error_artifact() {
    let rendered = Renderer::default().render("```chart pie\n{\"a\": }\n```");
    assert!(!rendered.output.is_fallback());

    let html = rendered.html();
    assert!(html.contains("data-type=\"chart-error\""));
    assert!(html.contains("Invalid chart data:"));
    assert!(html.contains("<pre><code>{\"a\": }</code></pre>"));
    assert!(!html.contains("data-type=\"chart\""));
}

#[test]
fn test_card_bindings_are_per_render() {
    let renderer = Renderer::default();
    let first = renderer.render(":::card[One]");
    let second = renderer.render(":::card[Two]\n\n:::card[Three]");

    assert_eq!(first.placeholders.len(), 1);
    assert_eq!(second.placeholders.len(), 2);
    // numbering restarts for every call
    assert_eq!(
        first
            .placeholders
            .get("__CARD_PLACEHOLDER_0__")
            .map(|c| c.title.as_str()),
        Some("One")
    );
    assert_eq!(
        second
            .placeholders
            .get("__CARD_PLACEHOLDER_0__")
            .map(|c| c.title.as_str()),
        Some("Two")
    );
}

#[test]
fn test_card_directive_with_body() {
    let rendered = Renderer::default().render("before\n\n:::card[Plan]{owner=\"Ann Lee\"}\nShip it\n:::\n\nafter");
    let binding = rendered.placeholders.iter().next().expect("one binding");

    assert_eq!(binding.directive, ":::card[Plan]{owner=\"Ann Lee\"}\nShip it\n:::");
    assert_eq!(binding.component.title, "Plan");
    assert_eq!(
        binding.component.attributes.get("owner").map(String::as_str),
        Some("Ann Lee")
    );
    assert_eq!(binding.component.body, "Ship it");
    assert!(rendered.html().contains(">__CARD_PLACEHOLDER_0__</div>"));
}

#[test]
fn test_unrecognized_directive_passes_through() {
    let html = render(":::card[Broken");
    assert_eq!(html, "<p class=\"md-paragraph\">:::card[Broken</p>");
}

struct UpperCaseCards;

impl CardDirectiveParser for UpperCaseCards {
    fn parse(&self, directive: &str) -> Option<CardComponent> {
        let title = directive.strip_prefix(":::card[")?.strip_suffix(']')?;
        Some(CardComponent {
            title: title.to_uppercase(),
            ..CardComponent::default()
        })
    }
}

#[test]
fn test_card_opener_only_counts_at_line_start() {
    let rendered = Renderer::default().render("See :::card[Team] here");
    assert_eq!(
        rendered.html(),
        "<p class=\"md-paragraph\">See :::card[Team] here</p>"
    );
    assert!(rendered.placeholders.is_empty());

    let indented = Renderer::default().render("  :::card[Team]");
    assert_eq!(indented.placeholders.len(), 1);
}

#[test]
fn test_hydrate_with_custom_components() {
    let rendered = Renderer::default()
        .with_card_parser(UpperCaseCards)
        .render(":::card[hi]");
    let html = rendered
        .hydrate(|binding: &PlaceholderBinding| Ok(format!("<b>{}</b>", binding.component.title)))
        .expect("hydrate");
    assert_eq!(
        html,
        "<div class=\"md-card\" data-type=\"card\" data-content=\"%3A%3A%3Acard%5Bhi%5D\"><b>HI</b></div>"
    );
}
