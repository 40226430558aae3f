//! Markdown block scanner (Markdown → `Vec<Block>`)
//!
//! A single forward pass over the lines of the document. At each position the
//! first matching rule wins, in this order: blank line, fenced block (chart or
//! code), card directive, table, heading, horizontal rule, blockquote run, list
//! run, paragraph. Inline content of each block is handed to
//! [`crate::common::inline::parse_inline`].

use crate::common::card::{CardDirective, CARD_CLOSER, CARD_OPENER};
use crate::common::chart::{chart_type_from_info, ChartData};
use crate::common::frontmatter::strip_frontmatter;
use crate::common::inline::parse_inline;
use crate::common::table::{is_separator_line, parse_table};
use crate::ir::nodes::{Block, CodeBlock, List};
use crate::options::RenderOptions;

const FENCE: &str = "```";

/// Scan a Markdown document into blocks.
pub fn parse_blocks(source: &str, options: &RenderOptions) -> Vec<Block> {
    let source = if options.strip_frontmatter {
        strip_frontmatter(source)
    } else {
        source
    };
    let lines: Vec<&str> = source.lines().collect();
    let mut scanner = Scanner {
        lines: &lines,
        pos: 0,
        max_heading_level: options.max_heading_level.clamp(1, 6),
    };

    let mut blocks = Vec::new();
    while let Some(block) = scanner.next_block() {
        blocks.extend(block);
    }
    blocks
}

struct Scanner<'a> {
    lines: &'a [&'a str],
    pos: usize,
    max_heading_level: u8,
}

impl<'a> Scanner<'a> {
    /// `None` at end of input; `Some(None)` when lines were consumed without
    /// producing a block.
    fn next_block(&mut self) -> Option<Option<Block>> {
        let line = *self.lines.get(self.pos)?;

        if line.trim().is_empty() {
            self.pos += 1;
            return Some(None);
        }
        if let Some(block) = self.fenced_block() {
            return Some(Some(block));
        }
        if let Some(block) = self.card() {
            return Some(Some(block));
        }
        if let Some(block) = self.table() {
            return Some(Some(block));
        }
        if let Some((level, text)) = heading(line, self.max_heading_level) {
            self.pos += 1;
            return Some(Some(Block::Heading {
                level,
                content: parse_inline(text),
            }));
        }
        if is_horizontal_rule(line) {
            self.pos += 1;
            return Some(Some(Block::HorizontalRule));
        }
        if quote_text(line).is_some() {
            return Some(Some(self.blockquote()));
        }
        if let Some((ordered, _)) = list_item(line) {
            return Some(Some(self.list(ordered)));
        }
        Some(self.paragraph())
    }

    fn fenced_block(&mut self) -> Option<Block> {
        let opener = self.lines[self.pos].trim_start();
        if !opener.starts_with(FENCE) {
            return None;
        }
        let ticks = opener.len() - opener.trim_start_matches('`').len();
        let info = opener[ticks..].trim();
        let body_start = self.pos + 1;
        let close = (body_start..self.lines.len())
            .find(|&idx| is_fence_close(self.lines[idx], ticks))
            .unwrap_or(self.lines.len());
        let body = self.lines[body_start..close].join("\n");
        self.pos = (close + 1).min(self.lines.len());

        if let Some(chart_type) = chart_type_from_info(info) {
            return Some(Block::Chart(ChartData::from_fence(chart_type, &body)));
        }
        let language = info.split_whitespace().next().map(str::to_string);
        Some(Block::CodeBlock(CodeBlock {
            language,
            code: body,
        }))
    }

    fn card(&mut self) -> Option<Block> {
        if !self.lines[self.pos].trim_start().starts_with(CARD_OPENER) {
            return None;
        }
        let start = self.pos;
        let mut end = start;
        for idx in start + 1..self.lines.len() {
            let line = self.lines[idx];
            if line.trim() == CARD_CLOSER {
                end = idx;
                break;
            }
            // a new directive means this one was single-line
            if line.trim_start().starts_with(CARD_OPENER) {
                break;
            }
        }
        self.pos = end + 1;
        Some(Block::Card(CardDirective {
            raw: self.lines[start..=end].join("\n"),
        }))
    }

    fn table(&mut self) -> Option<Block> {
        if !self.starts_table(self.pos) {
            return None;
        }
        let end = (self.pos..self.lines.len())
            .find(|&idx| {
                let line = self.lines[idx];
                line.trim().is_empty() || !line.contains('|')
            })
            .unwrap_or(self.lines.len());
        let text = self.lines[self.pos..end].join("\n");
        match parse_table(&text) {
            Some(table) => {
                self.pos = end;
                Some(Block::Table(table))
            }
            None => {
                tracing::debug!(line = self.pos + 1, "table rejected, rendering as text");
                None
            }
        }
    }

    /// Header line, separator line and at least one data line.
    fn starts_table(&self, idx: usize) -> bool {
        let has_pipe = |i: usize| {
            self.lines
                .get(i)
                .is_some_and(|line| line.contains('|') && !line.trim().is_empty())
        };
        has_pipe(idx)
            && self.lines.get(idx + 1).is_some_and(|l| is_separator_line(l))
            && has_pipe(idx + 2)
    }

    fn blockquote(&mut self) -> Block {
        let mut parts = Vec::new();
        while let Some(text) = self.lines.get(self.pos).and_then(|line| quote_text(line)) {
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text);
            }
            self.pos += 1;
        }
        Block::Blockquote(parse_inline(&parts.join(" ")))
    }

    fn list(&mut self, ordered: bool) -> Block {
        let mut items = Vec::new();
        while let Some((kind, text)) = self.lines.get(self.pos).and_then(|line| list_item(line)) {
            if kind != ordered {
                break;
            }
            items.push(parse_inline(text.trim()));
            self.pos += 1;
        }
        Block::List(List { ordered, items })
    }

    fn paragraph(&mut self) -> Option<Block> {
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.lines.len() && !self.interrupts_paragraph(self.pos) {
            self.pos += 1;
        }
        let text = self.lines[start..self.pos].join("\n");
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Block::Paragraph(parse_inline(text)))
    }

    fn interrupts_paragraph(&self, idx: usize) -> bool {
        let line = self.lines[idx];
        let trimmed = line.trim_start();
        line.trim().is_empty()
            || trimmed.starts_with(FENCE)
            || trimmed.starts_with(CARD_OPENER)
            || self.starts_table(idx)
            || heading(line, self.max_heading_level).is_some()
            || is_horizontal_rule(line)
            || quote_text(line).is_some()
            || list_item(line).is_some()
    }
}

/// A line of backticks only, at least as long as the opening fence.
fn is_fence_close(line: &str, ticks: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= ticks && trimmed.chars().all(|c| c == '`')
}

/// `#`×n followed by a space, for 1 ≤ n ≤ `max_level`.
fn heading(line: &str, max_level: u8) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > usize::from(max_level) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(' ') {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    Some((hashes as u8, text))
}

fn is_horizontal_rule(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && (trimmed.chars().all(|c| c == '-') || trimmed.chars().all(|c| c == '*'))
}

fn quote_text(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// `(ordered, item text)` when the line starts a list item.
fn list_item(line: &str) -> Option<(bool, &str)> {
    let trimmed = line.trim_start();
    for marker in ["- ", "* ", "+ "] {
        if let Some(text) = trimmed.strip_prefix(marker) {
            return Some((false, text));
        }
    }
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(text) = trimmed[digits..].strip_prefix(". ") {
            return Some((true, text));
        }
    }
    None
}
