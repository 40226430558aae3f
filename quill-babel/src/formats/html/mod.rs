//! HTML side of the conversion
//!
//! Rendering (Markdown → HTML) lives in `serializer`, reading HTML back into a
//! [`Node`](crate::ir::tree::Node) tree lives in `parser`. Both go through the
//! `html5ever` + `markup5ever_rcdom` stack: elements are built as RcDom nodes
//! and serialized by `html5ever`, so escaping is never done by hand.
//!
//! # Element Mapping
//!
//! | Markdown            | HTML                                                         |
//! |---------------------|--------------------------------------------------------------|
//! | `# Title`           | `<h1 class="md-h1">`                                         |
//! | paragraph           | `<p class="md-paragraph">`                                   |
//! | `> quote`           | `<blockquote class="md-blockquote">`                         |
//! | `- item` / `1. item`| `<ul class="md-list">` / `<ol>` + `<li class="md-list-item">`|
//! | fenced code         | `<pre class="md-code-block"><code class="language-x">`      |
//! | pipe table          | `<table class="md-table">` with `<thead>`/`<tbody>`          |
//! | chart fence         | `<div data-type="chart" data-chart-type data-chart-data>`    |
//! | invalid chart fence | `<div data-type="chart-error" data-content>`                 |
//! | `:::card[...]`      | `<div data-type="card" data-content>` + placeholder token    |
//! | `---`               | `<hr>`                                                       |
//!
//! Classes are cosmetic: the parser only looks at tag names and `data-*`
//! attributes.

pub(crate) mod dom;
pub mod parser;
pub mod serializer;

use crate::common::card::{
    CardComponent, CardDirectiveParser, DirectiveCardParser, PlaceholderBinding,
    PlaceholderBindings,
};
use crate::error::ConvertError;
use crate::options::RenderOptions;
use crate::outcome::{panic_message, Conversion};
use dom::{append, create_element, create_text, serialize_node};
use std::panic::{catch_unwind, AssertUnwindSafe};

pub use parser::parse_html;

/// Markdown → HTML renderer.
pub struct Renderer {
    options: RenderOptions,
    cards: Box<dyn CardDirectiveParser>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            cards: Box::new(DirectiveCardParser),
        }
    }

    /// Use another directive parser for `:::card[...]` blocks.
    pub fn with_card_parser(mut self, cards: impl CardDirectiveParser + 'static) -> Self {
        self.cards = Box::new(cards);
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render, returning the Markdown unchanged if anything goes wrong.
    pub fn render(&self, markdown: &str) -> Rendered {
        let result = catch_unwind(AssertUnwindSafe(|| self.try_render(markdown)))
            .unwrap_or_else(|payload| Err(ConvertError::Internal(panic_message(payload.as_ref()))));

        match result {
            Ok((html, placeholders)) => Rendered {
                output: Conversion::Converted(html),
                placeholders,
            },
            Err(e) => {
                tracing::warn!(error = %e, "markdown rendering failed, returning source");
                Rendered {
                    output: Conversion::FallbackUsed {
                        original: markdown.to_string(),
                        cause: e.to_string(),
                    },
                    placeholders: PlaceholderBindings::default(),
                }
            }
        }
    }

    /// Render without the fallback.
    pub fn try_render(
        &self,
        markdown: &str,
    ) -> Result<(String, PlaceholderBindings), ConvertError> {
        serializer::render_document(markdown, &self.options, self.cards.as_ref())
    }
}

/// Output of one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub output: Conversion,
    /// Card tokens bound during this call only.
    pub placeholders: PlaceholderBindings,
}

impl Rendered {
    pub fn html(&self) -> &str {
        self.output.text()
    }

    /// Replace every bound placeholder token with component HTML.
    pub fn hydrate<F>(&self, mut component_html: F) -> Result<String, ConvertError>
    where
        F: FnMut(&PlaceholderBinding) -> Result<String, ConvertError>,
    {
        let mut html = self.html().to_string();
        for binding in self.placeholders.iter() {
            html = html.replace(&binding.token, &component_html(binding)?);
        }
        Ok(html)
    }

    /// [`Rendered::hydrate`] with [`render_card`].
    pub fn hydrate_default(&self) -> Result<String, ConvertError> {
        self.hydrate(|binding| render_card(&binding.component))
    }
}

/// Default component markup for a card.
///
/// Attributes become `data-*` attributes on the outer element.
pub fn render_card(card: &CardComponent) -> Result<String, ConvertError> {
    let names: Vec<String> = card
        .attributes
        .keys()
        .map(|key| format!("data-{key}"))
        .collect();
    let mut attrs = vec![("class", "card")];
    for (name, value) in names.iter().zip(card.attributes.values()) {
        attrs.push((name.as_str(), value.as_str()));
    }
    let element = create_element("article", attrs);

    let title = create_element("h3", vec![("class", "card-title")]);
    append(&title, create_text(&card.title));
    append(&element, title);

    if !card.body.is_empty() {
        let body = create_element("p", vec![("class", "card-body")]);
        append(&body, create_text(&card.body));
        append(&element, body);
    }

    serialize_node(&element)
}
