//! Markdown serialization (`Node` tree → Markdown)
//!
//! A depth-first walk with two modes. Block nodes are written as separate
//! chunks joined by blank lines; inline nodes accumulate into a pending
//! paragraph that is flushed when the next block starts. Loose inline content
//! directly inside a container therefore still forms a paragraph, and
//! whitespace-only runs between blocks disappear. Below [`MAX_NESTING`]
//! levels a subtree is written as its plain text.

use crate::common::card::PlaceholderBindings;
use crate::common::chart::{decode_attribute, ChartData};
use crate::common::table::serialize_table;
use crate::common::whitespace::{collapse_whitespace, fence_for, normalize_blank_lines};
use crate::ir::tree::Node;
use crate::ir::MAX_NESTING;
use crate::options::SerializeOptions;

/// Serialize a node tree to Markdown.
pub fn serialize_to_markdown(
    node: &Node,
    options: &SerializeOptions,
    bindings: Option<&PlaceholderBindings>,
) -> String {
    let mut writer = MarkdownWriter::new(options, bindings);
    writer.block(node);
    normalize_blank_lines(&writer.finish())
}

struct MarkdownWriter<'a> {
    options: &'a SerializeOptions,
    bindings: Option<&'a PlaceholderBindings>,
    depth: usize,
    blocks: Vec<String>,
    pending: String,
}

impl<'a> MarkdownWriter<'a> {
    fn new(options: &'a SerializeOptions, bindings: Option<&'a PlaceholderBindings>) -> Self {
        Self {
            options,
            bindings,
            depth: 0,
            blocks: Vec::new(),
            pending: String::new(),
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        self.blocks.join("\n\n")
    }

    fn flush(&mut self) {
        let text = std::mem::take(&mut self.pending);
        let text = text.trim();
        if !text.is_empty() {
            self.blocks.push(text.to_string());
        }
    }

    fn push_block(&mut self, text: String) {
        self.flush();
        if !text.trim().is_empty() {
            self.blocks.push(text);
        }
    }

    fn block(&mut self, node: &Node) {
        match node {
            Node::Heading { level, children } => {
                let text = collapse_whitespace(&self.inline_children(children, self.depth));
                if !text.is_empty() {
                    let level = usize::from((*level).clamp(1, 6));
                    self.push_block(format!("{} {text}", "#".repeat(level)));
                }
            }
            Node::Paragraph(children) => {
                let text = self.inline_children(children, self.depth);
                self.push_block(text.trim().to_string());
            }
            Node::CodeBlock { language, code } => {
                let code = code.trim_end_matches('\n');
                let language = language.as_deref().unwrap_or_default();
                let fence = fence_for(code);
                self.push_block(format!("{fence}{language}\n{code}\n{fence}"));
            }
            Node::Blockquote(children) => {
                let text = collapse_whitespace(&self.inline_children(children, self.depth));
                if !text.is_empty() {
                    self.push_block(format!("> {text}"));
                }
            }
            Node::UnorderedList(children) => {
                let bullet = self.options.bullet_marker;
                let lines = self.list_items(children, |_| bullet.to_string());
                self.push_block(lines);
            }
            Node::OrderedList(children) => {
                let lines = self.list_items(children, |n| format!("{n}."));
                self.push_block(lines);
            }
            Node::ListItem(children) => {
                let text = collapse_whitespace(&self.inline_children(children, self.depth));
                if !text.is_empty() {
                    self.push_block(format!("{} {text}", self.options.bullet_marker));
                }
            }
            Node::Table(table) => self.push_block(serialize_table(table)),
            Node::ChartPlaceholder { chart_type, data } => {
                let markdown = if chart_type.trim().is_empty() {
                    let code = decode_attribute(data);
                    let fence = fence_for(&code);
                    format!("{fence}\n{code}\n{fence}")
                } else {
                    ChartData::from_placeholder(chart_type.trim(), data).to_markdown()
                };
                self.push_block(markdown);
            }
            Node::CardPlaceholder { directive, token } => {
                match self.card_directive(directive.as_deref(), token) {
                    Some(directive) => self.push_block(directive),
                    None => tracing::debug!(%token, "card placeholder without directive dropped"),
                }
            }
            Node::HorizontalRule => self.push_block("---".to_string()),
            Node::Container(_) if self.depth >= MAX_NESTING => {
                let text = node.text_content();
                self.pending.push_str(&text);
            }
            Node::Container(children) if is_inline(node) => {
                let text = self.inline_children(children, self.depth);
                self.pending.push_str(&text);
            }
            Node::Container(children) => {
                let mut inner = MarkdownWriter::new(self.options, self.bindings);
                inner.depth = self.depth + 1;
                for child in children {
                    inner.block(child);
                }
                self.push_block(inner.finish());
            }
            Node::Strong(_)
            | Node::Emphasis(_)
            | Node::InlineCode(_)
            | Node::Link { .. }
            | Node::LineBreak
            | Node::Text(_) => {
                let text = self.inline(node, self.depth);
                self.pending.push_str(&text);
            }
        }
    }

    fn card_directive(&self, directive: Option<&str>, token: &str) -> Option<String> {
        directive
            .map(str::to_string)
            .or_else(|| {
                self.bindings
                    .and_then(|bindings| bindings.directive_for(token))
                    .map(str::to_string)
            })
    }

    fn list_items(&self, children: &[Node], marker: impl Fn(usize) -> String) -> String {
        let mut lines = Vec::new();
        for child in children {
            let content = match child {
                Node::ListItem(item) => self.inline_children(item, self.depth + 1),
                other => self.inline(other, self.depth + 1),
            };
            let text = collapse_whitespace(&content);
            if text.is_empty() {
                continue;
            }
            lines.push(format!("{} {text}", marker(lines.len() + 1)));
        }
        lines.join("\n")
    }

    fn inline_children(&self, children: &[Node], depth: usize) -> String {
        children
            .iter()
            .map(|child| self.inline(child, depth + 1))
            .collect()
    }

    fn inline(&self, node: &Node, depth: usize) -> String {
        if depth >= MAX_NESTING {
            return node.text_content();
        }
        match node {
            Node::Text(text) => text.clone(),
            Node::Strong(children) => wrap(&self.inline_children(children, depth), "**"),
            Node::Emphasis(children) => {
                let marker = self.options.emphasis_marker.to_string();
                wrap(&self.inline_children(children, depth), &marker)
            }
            Node::InlineCode(code) => code_span(code),
            Node::Link { href, children } => {
                let text = self.inline_children(children, depth);
                if href.is_empty() {
                    text
                } else {
                    format!("[{text}]({href})")
                }
            }
            Node::LineBreak => "\n".to_string(),
            Node::Container(children) => self.inline_children(children, depth),
            Node::CardPlaceholder { directive, token } => self
                .card_directive(directive.as_deref(), token)
                .unwrap_or_default(),
            Node::Table(_) | Node::ChartPlaceholder { .. } | Node::HorizontalRule => {
                " ".to_string()
            }
            Node::CodeBlock { code, .. } => format!(" {} ", code_span(code)),
            Node::Heading { children, .. }
            | Node::Paragraph(children)
            | Node::Blockquote(children)
            | Node::UnorderedList(children)
            | Node::OrderedList(children)
            | Node::ListItem(children) => format!(" {} ", self.inline_children(children, depth)),
        }
    }
}

/// Phrasing content: stays in the pending paragraph in block mode.
fn is_inline(node: &Node) -> bool {
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        match node {
            Node::Text(_)
            | Node::Strong(_)
            | Node::Emphasis(_)
            | Node::InlineCode(_)
            | Node::Link { .. }
            | Node::LineBreak => {}
            Node::Container(children) => stack.extend(children),
            _ => return false,
        }
    }
    true
}

/// Wrap `text` in `marker`, moving edge whitespace outside the markers.
fn wrap(text: &str, marker: &str) -> String {
    let core = text.trim();
    if core.is_empty() {
        return text.to_string();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    format!("{leading}{marker}{core}{marker}{trailing}")
}

/// Backtick fence one longer than the longest run inside the code.
fn code_span(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or_default();
    if longest == 0 {
        return format!("`{code}`");
    }
    let fence = "`".repeat(longest + 1);
    format!("{fence} {code} {fence}")
}
