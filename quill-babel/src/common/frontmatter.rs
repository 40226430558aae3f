//! Leading `---` metadata blocks.
//!
//! The renderer only needs [`strip_frontmatter`]; the metadata itself belongs to
//! the storage layer, which can read it through [`parse_frontmatter`]. Only the
//! simple key-value subset used by content files is understood:
//!
//! ```text
//! ---
//! title: Hello
//! tags: [a, b]
//! authors:
//!   - Ann
//!   - Bo
//! ---
//! ```

use serde::Serialize;
use std::collections::BTreeMap;

const DELIMITER: &str = "---";

/// A frontmatter value: a single string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    Text(String),
    List(Vec<String>),
}

/// Parsed frontmatter. Keys are unique; a repeated key keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frontmatter {
    pub fields: BTreeMap<String, FrontmatterValue>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split a document into its raw frontmatter lines and the body after the closing line.
fn split(source: &str) -> Option<(Vec<&str>, &str)> {
    let mut offset = 0;
    let mut lines = source.split_inclusive('\n');

    let first = lines.next()?;
    if trim_newline(first) != DELIMITER {
        return None;
    }
    offset += first.len();

    let mut inner = Vec::new();
    for line in lines {
        offset += line.len();
        if trim_newline(line) == DELIMITER {
            return Some((inner, &source[offset..]));
        }
        inner.push(trim_newline(line));
    }
    None
}

fn trim_newline(line: &str) -> &str {
    line.trim_end_matches('\n').trim_end_matches('\r')
}

/// Remove a leading frontmatter block. Text without a closed block is returned unchanged.
pub fn strip_frontmatter(source: &str) -> &str {
    match split(source) {
        Some((_, body)) => body,
        None => source,
    }
}

/// Parse a leading frontmatter block, returning it with the remaining body.
pub fn parse_frontmatter(source: &str) -> Option<(Frontmatter, &str)> {
    let (lines, body) = split(source)?;
    let mut frontmatter = Frontmatter::default();
    let mut pending_list: Option<(String, Vec<String>)> = None;

    for line in lines {
        let trimmed = line.trim();
        if let Some(item) = trimmed.strip_prefix("- ") {
            if let Some((_, items)) = pending_list.as_mut() {
                items.push(unquote(item.trim()).to_string());
                continue;
            }
        }

        if let Some((key, items)) = pending_list.take() {
            let value = if items.is_empty() {
                FrontmatterValue::Text(String::new())
            } else {
                FrontmatterValue::List(items)
            };
            frontmatter.fields.insert(key, value);
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();

        if value.is_empty() {
            pending_list = Some((key.to_string(), Vec::new()));
        } else if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            let items = inner
                .split(',')
                .map(|item| unquote(item.trim()).to_string())
                .filter(|item| !item.is_empty())
                .collect();
            frontmatter
                .fields
                .insert(key.to_string(), FrontmatterValue::List(items));
        } else {
            frontmatter.fields.insert(
                key.to_string(),
                FrontmatterValue::Text(unquote(value).to_string()),
            );
        }
    }

    if let Some((key, items)) = pending_list {
        let value = if items.is_empty() {
            FrontmatterValue::Text(String::new())
        } else {
            FrontmatterValue::List(items)
        };
        frontmatter.fields.insert(key, value);
    }

    Some((frontmatter, body))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
