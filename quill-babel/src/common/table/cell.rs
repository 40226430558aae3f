//! Restricted rich text inside table cells.
//!
//! Cells cannot hold blocks, and formatting nests one level deep only: a bold
//! run holding a link keeps the bold and flattens the link to its text. Line
//! breaks are written as `<br>` on the Markdown side since a cell is one line.

use crate::common::inline::parse_inline;
use crate::ir::nodes::Inline;
use serde::{Deserialize, Serialize};

const LINE_BREAKS: [&str; 3] = ["<br />", "<br/>", "<br>"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CellRun {
    Plain { text: String },
    Bold { text: String },
    Italic { text: String },
    InlineCode { text: String },
    Link { text: String, href: String },
    LineBreak,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellContent {
    pub runs: Vec<CellRun>,
}

impl CellContent {
    /// Parse the Markdown text of one cell.
    pub fn parse(text: &str) -> Self {
        let mut runs = Vec::new();
        for (idx, segment) in split_line_breaks(text).into_iter().enumerate() {
            if idx > 0 {
                runs.push(CellRun::LineBreak);
            }
            for inline in parse_inline(segment) {
                runs.push(run_from_inline(inline));
            }
        }
        Self { runs }
    }

    /// Markdown text for this cell.
    pub fn to_markdown(&self) -> String {
        self.runs
            .iter()
            .map(|run| match run {
                CellRun::Plain { text } => text.clone(),
                CellRun::Bold { text } => wrap(text, "**"),
                CellRun::Italic { text } => wrap(text, "*"),
                CellRun::InlineCode { text } => format!("`{text}`"),
                CellRun::Link { text, href } => format!("[{text}]({href})"),
                CellRun::LineBreak => "<br>".to_string(),
            })
            .collect()
    }

    pub(crate) fn push_plain(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(CellRun::Plain { text: last }) = self.runs.last_mut() {
            last.push_str(text);
        } else {
            self.runs.push(CellRun::Plain {
                text: text.to_string(),
            });
        }
    }

    pub(crate) fn push(&mut self, run: CellRun) {
        match run {
            CellRun::Plain { text } => self.push_plain(&text),
            other => self.runs.push(other),
        }
    }
}

fn wrap(text: &str, marker: &str) -> String {
    if text.trim().is_empty() {
        text.to_string()
    } else {
        format!("{marker}{text}{marker}")
    }
}

/// Split on `<br>` variants, case-insensitively.
fn split_line_breaks(text: &str) -> Vec<&str> {
    let lower = text.to_ascii_lowercase();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut idx = 0;

    while idx < text.len() {
        let tag = LINE_BREAKS
            .iter()
            .find(|tag| lower[idx..].starts_with(**tag));
        match tag {
            Some(tag) => {
                segments.push(&text[start..idx]);
                idx += tag.len();
                start = idx;
            }
            None => {
                idx += text[idx..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    segments.push(&text[start..]);
    segments
}

fn run_from_inline(inline: Inline) -> CellRun {
    match inline {
        Inline::Text(text) => CellRun::Plain { text },
        Inline::Strong(children) => CellRun::Bold {
            text: Inline::plain_text(&children),
        },
        Inline::Emphasis(children) => CellRun::Italic {
            text: Inline::plain_text(&children),
        },
        Inline::Code(text) => CellRun::InlineCode { text },
        Inline::Link { href, children } => CellRun::Link {
            text: Inline::plain_text(&children),
            href,
        },
    }
}
