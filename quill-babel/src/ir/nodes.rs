//! Core data structures for the Markdown side of the conversion.

use crate::common::card::CardDirective;
use crate::common::chart::ChartData;
use crate::common::table::TableValue;

/// A block-level Markdown element, as recognized by the block scanner.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    /// Consecutive `>` lines, joined into one quote.
    Blockquote(Vec<Inline>),
    List(List),
    CodeBlock(CodeBlock),
    Table(TableValue),
    Chart(ChartData),
    Card(CardDirective),
    HorizontalRule,
}

/// A run of contiguous list items of the same kind.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<Vec<Inline>>,
}

/// A fenced code block.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub code: String,
}

/// Inline content inside a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(String),
    Link { href: String, children: Vec<Inline> },
}

impl Inline {
    /// Plain text with all formatting removed.
    pub fn plain_text(content: &[Inline]) -> String {
        let mut out = String::new();
        for inline in content {
            match inline {
                Inline::Text(text) | Inline::Code(text) => out.push_str(text),
                Inline::Strong(children)
                | Inline::Emphasis(children)
                | Inline::Link { children, .. } => out.push_str(&Inline::plain_text(children)),
            }
        }
        out
    }
}
