//! HTML parsing (HTML → `Node` tree)
//!
//! The string is parsed with `html5ever` into an RcDom, then lowered into the
//! closed [`Node`] set. `data-type` is looked at before the tag name so chart,
//! card and chart-error placeholders are recognized whatever element carries
//! them.

use super::dom::{attr, find_element, parse_html_document, tag_name, text_content};
use crate::common::chart::decode_attribute;
use crate::common::table::html::table_from_dom;
use crate::ir::tree::Node;
use crate::ir::MAX_NESTING;
use markup5ever_rcdom::{Handle, NodeData};

/// Parse an HTML document or fragment into a container of its body content.
pub fn parse_html(html: &str) -> Node {
    let dom = parse_html_document(html);
    let root = find_element(&dom.document, "body").unwrap_or_else(|| dom.document.clone());
    Node::Container(lower_children(&root, 0))
}

fn lower_children(handle: &Handle, depth: usize) -> Vec<Node> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(|child| lower(child, depth + 1))
        .collect()
}

fn lower(handle: &Handle, depth: usize) -> Option<Node> {
    let tag = match &handle.data {
        NodeData::Text { contents } => return Some(Node::Text(contents.borrow().to_string())),
        NodeData::Element { .. } => tag_name(handle)?,
        NodeData::Document => return Some(Node::Container(lower_children(handle, depth))),
        _ => return None,
    };

    if depth >= MAX_NESTING {
        return Some(Node::Text(text_content(handle)));
    }

    if let Some(node) = lower_data_type(handle) {
        return Some(node);
    }

    let node = match tag.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Node::Heading {
            level: tag[1..].parse().unwrap_or(1),
            children: lower_children(handle, depth),
        },
        "p" => Node::Paragraph(lower_children(handle, depth)),
        "strong" | "b" => Node::Strong(lower_children(handle, depth)),
        "em" | "i" => Node::Emphasis(lower_children(handle, depth)),
        "code" => Node::InlineCode(text_content(handle)),
        "pre" => Node::CodeBlock {
            language: code_language(handle),
            code: text_content(handle),
        },
        "blockquote" => Node::Blockquote(lower_children(handle, depth)),
        "ul" => Node::UnorderedList(lower_children(handle, depth)),
        "ol" => Node::OrderedList(lower_children(handle, depth)),
        "li" => Node::ListItem(lower_children(handle, depth)),
        "table" => match table_from_dom(handle) {
            Some(table) => Node::Table(table),
            None => Node::Container(lower_children(handle, depth)),
        },
        "a" => Node::Link {
            href: attr(handle, "href").unwrap_or_default(),
            children: lower_children(handle, depth),
        },
        "br" => Node::LineBreak,
        "hr" => Node::HorizontalRule,
        "script" | "style" | "template" | "head" | "title" | "meta" | "link" | "noscript" => {
            return None
        }
        _ => Node::Container(lower_children(handle, depth)),
    };
    Some(node)
}

fn lower_data_type(handle: &Handle) -> Option<Node> {
    let node = match attr(handle, "data-type")?.as_str() {
        "chart" => Node::ChartPlaceholder {
            chart_type: attr(handle, "data-chart-type").unwrap_or_default(),
            data: attr(handle, "data-chart-data").unwrap_or_default(),
        },
        "card" => Node::CardPlaceholder {
            directive: attr(handle, "data-content")
                .map(|content| decode_attribute(&content))
                .filter(|directive| !directive.trim().is_empty()),
            token: text_content(handle).trim().to_string(),
        },
        "chart-error" => Node::CodeBlock {
            language: None,
            code: match attr(handle, "data-content") {
                Some(content) => decode_attribute(&content),
                None => find_element(handle, "pre")
                    .map(|pre| text_content(&pre))
                    .unwrap_or_else(|| text_content(handle)),
            },
        },
        _ => return None,
    };
    Some(node)
}

/// Language from `class="language-x"` / `lang-x` on the inner `<code>`, or a
/// `data-language` attribute on either element.
fn code_language(pre: &Handle) -> Option<String> {
    let code = find_element(pre, "code");
    let from_class = code
        .as_ref()
        .and_then(|code| attr(code, "class"))
        .and_then(|class| {
            class.split_whitespace().find_map(|name| {
                name.strip_prefix("language-")
                    .or_else(|| name.strip_prefix("lang-"))
                    .map(str::to_string)
            })
        });
    from_class
        .or_else(|| code.as_ref().and_then(|code| attr(code, "data-language")))
        .or_else(|| attr(pre, "data-language"))
        .filter(|language| !language.is_empty())
}
