//! HTML rendering (Markdown blocks → HTML)
//!
//! Pipeline: Markdown → `Vec<Block>` (block scanner) → one RcDom subtree per
//! block → HTML string. Blocks are serialized one at a time and joined by a
//! single newline.

use super::dom::{append, create_element, create_styled, create_text, serialize_node};
use crate::common::card::{CardDirective, CardDirectiveParser, PlaceholderBindings};
use crate::common::chart::{encode_attribute, ChartData};
use crate::common::table::html::table_to_dom;
use crate::error::ConvertError;
use crate::formats::markdown::parser::parse_blocks;
use crate::ir::nodes::{Block, CodeBlock, Inline, List};
use crate::options::RenderOptions;
use markup5ever_rcdom::Handle;

/// Render a Markdown document, returning the HTML and the card bindings made
/// along the way.
pub fn render_document(
    markdown: &str,
    options: &RenderOptions,
    cards: &dyn CardDirectiveParser,
) -> Result<(String, PlaceholderBindings), ConvertError> {
    let blocks = parse_blocks(markdown, options);
    let mut builder = HtmlBuilder {
        options,
        cards,
        bindings: PlaceholderBindings::new(),
    };

    let mut parts = Vec::with_capacity(blocks.len());
    for block in &blocks {
        let element = builder.block(block);
        parts.push(serialize_node(&element)?);
    }

    Ok((parts.join("\n").trim().to_string(), builder.bindings))
}

struct HtmlBuilder<'a> {
    options: &'a RenderOptions,
    cards: &'a dyn CardDirectiveParser,
    bindings: PlaceholderBindings,
}

impl HtmlBuilder<'_> {
    fn styled(&self, tag: &str, class: &str) -> Handle {
        create_styled(tag, self.options.class(class).as_deref())
    }

    fn block(&mut self, block: &Block) -> Handle {
        match block {
            Block::Heading { level, content } => {
                let tag = format!("h{level}");
                let element = self.styled(&tag, &tag);
                self.inlines(&element, content);
                element
            }
            Block::Paragraph(content) => {
                let element = self.styled("p", "paragraph");
                self.inlines(&element, content);
                element
            }
            Block::Blockquote(content) => {
                let element = self.styled("blockquote", "blockquote");
                self.inlines(&element, content);
                element
            }
            Block::List(list) => self.list(list),
            Block::CodeBlock(code) => self.code_block(code),
            Block::Table(table) => {
                table_to_dom(table, self.options.class("table").as_deref())
            }
            Block::Chart(chart) => self.chart(chart),
            Block::Card(directive) => self.card(directive),
            Block::HorizontalRule => create_element("hr", vec![]),
        }
    }

    fn list(&self, list: &List) -> Handle {
        let tag = if list.ordered { "ol" } else { "ul" };
        let element = self.styled(tag, "list");
        for item in &list.items {
            let li = self.styled("li", "list-item");
            self.inlines(&li, item);
            append(&element, li);
        }
        element
    }

    fn code_block(&self, block: &CodeBlock) -> Handle {
        let pre = self.styled("pre", "code-block");
        let code = match &block.language {
            Some(language) => {
                let class = format!("language-{language}");
                create_element("code", vec![("class", &class)])
            }
            None => create_element("code", vec![]),
        };
        append(&code, create_text(&block.code));
        append(&pre, code);
        pre
    }

    fn chart(&self, chart: &ChartData) -> Handle {
        match chart {
            ChartData::Valid(block) => {
                let data = encode_attribute(&block.source());
                let mut attrs = Vec::new();
                let class = self.options.class("chart");
                if let Some(class) = class.as_deref() {
                    attrs.push(("class", class));
                }
                attrs.push(("data-type", "chart"));
                attrs.push(("data-chart-type", block.chart_type.as_str()));
                attrs.push(("data-chart-data", data.as_str()));
                create_element("div", attrs)
            }
            ChartData::Invalid(invalid) => {
                let content = encode_attribute(&invalid.raw);
                let mut attrs = Vec::new();
                let class = self.options.class("chart-error");
                if let Some(class) = class.as_deref() {
                    attrs.push(("class", class));
                }
                attrs.push(("data-type", "chart-error"));
                attrs.push(("data-chart-type", invalid.chart_type.as_str()));
                attrs.push(("data-content", content.as_str()));
                let element = create_element("div", attrs);

                let message = create_element("p", vec![]);
                append(
                    &message,
                    create_text(&format!("Invalid chart data: {}", invalid.error)),
                );
                append(&element, message);

                let pre = create_element("pre", vec![]);
                let code = create_element("code", vec![]);
                append(&code, create_text(&invalid.raw));
                append(&pre, code);
                append(&element, pre);
                element
            }
        }
    }

    fn card(&mut self, directive: &CardDirective) -> Handle {
        let Some(component) = self.cards.parse(&directive.raw) else {
            tracing::debug!(directive = %directive.raw, "unrecognized card directive");
            let element = self.styled("p", "paragraph");
            append(&element, create_text(&directive.raw));
            return element;
        };

        let token = self.bindings.bind(&directive.raw, component);
        let content = encode_attribute(&directive.raw);
        let mut attrs = Vec::new();
        let class = self.options.class("card");
        if let Some(class) = class.as_deref() {
            attrs.push(("class", class));
        }
        attrs.push(("data-type", "card"));
        attrs.push(("data-content", content.as_str()));
        let element = create_element("div", attrs);
        append(&element, create_text(&token));
        element
    }

    fn inlines(&self, parent: &Handle, content: &[Inline]) {
        for inline in content {
            append(parent, self.inline(inline));
        }
    }

    fn inline(&self, inline: &Inline) -> Handle {
        match inline {
            Inline::Text(text) => create_text(text),
            Inline::Strong(children) => {
                let element = create_element("strong", vec![]);
                self.inlines(&element, children);
                element
            }
            Inline::Emphasis(children) => {
                let element = create_element("em", vec![]);
                self.inlines(&element, children);
                element
            }
            Inline::Code(code) => {
                let element = self.styled("code", "code");
                append(&element, create_text(code));
                element
            }
            Inline::Link { href, children } => {
                let mut attrs = vec![("href", href.as_str())];
                let class = self.options.class("link");
                if let Some(class) = class.as_deref() {
                    attrs.push(("class", class));
                }
                let element = create_element("a", attrs);
                self.inlines(&element, children);
                element
            }
        }
    }
}
