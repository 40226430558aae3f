//! The tree walked by the HTML → Markdown serializer.
//!
//! HTML is parsed by `html5ever` and lowered into this closed set of variants
//! (see `formats::html::parser`). Anything the serializer does not know about is
//! a [`Node::Container`], so new tags degrade to their text instead of failing.

use crate::common::table::TableValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Heading { level: u8, children: Vec<Node> },
    Paragraph(Vec<Node>),
    Strong(Vec<Node>),
    Emphasis(Vec<Node>),
    InlineCode(String),
    CodeBlock { language: Option<String>, code: String },
    Blockquote(Vec<Node>),
    UnorderedList(Vec<Node>),
    OrderedList(Vec<Node>),
    ListItem(Vec<Node>),
    Table(TableValue),
    /// `data-type="chart"`; `data` is still URI-encoded.
    ChartPlaceholder { chart_type: String, data: String },
    /// `data-type="card"`; `directive` is the decoded `data-content`, `token`
    /// the placeholder text inside the element.
    CardPlaceholder { directive: Option<String>, token: String },
    Link { href: String, children: Vec<Node> },
    LineBreak,
    HorizontalRule,
    Container(Vec<Node>),
    Text(String),
}

impl Node {
    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Text(text) | Node::InlineCode(text) => out.push_str(text),
                Node::CodeBlock { code, .. } => out.push_str(code),
                Node::LineBreak => out.push('\n'),
                Node::HorizontalRule | Node::ChartPlaceholder { .. } => {}
                Node::CardPlaceholder { token, .. } => out.push_str(token),
                Node::Table(table) => {
                    out.push_str(&table.headers.join(" "));
                    for row in &table.rows {
                        out.push('\n');
                        out.push_str(&row.join(" "));
                    }
                }
                Node::Heading { children, .. }
                | Node::Link { children, .. }
                | Node::Paragraph(children)
                | Node::Strong(children)
                | Node::Emphasis(children)
                | Node::Blockquote(children)
                | Node::UnorderedList(children)
                | Node::OrderedList(children)
                | Node::ListItem(children)
                | Node::Container(children) => stack.extend(children.iter().rev()),
            }
        }
        out
    }
}
