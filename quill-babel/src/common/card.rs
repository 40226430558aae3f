//! `:::card[...]` directives and the placeholders standing in for them.
//!
//! Rendering replaces each recognised directive with a token such as
//! `__CARD_PLACEHOLDER_0__` and records the binding in a [`PlaceholderBindings`]
//! owned by that render call. The UI swaps tokens for components; only the
//! directive text is ever persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CARD_OPENER: &str = ":::card[";
pub const CARD_CLOSER: &str = ":::";

/// The raw directive text, first line through the closing `:::` if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDirective {
    pub raw: String,
}

/// A UI component described by a directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardComponent {
    pub title: String,
    pub attributes: BTreeMap<String, String>,
    pub body: String,
}

/// Turns directive text into a component, or rejects it.
pub trait CardDirectiveParser: Send + Sync {
    fn parse(&self, directive: &str) -> Option<CardComponent>;
}

/// Parser for `:::card[Title]{key="value" key2=value}` with optional body
/// lines and a closing `:::`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveCardParser;

impl CardDirectiveParser for DirectiveCardParser {
    fn parse(&self, directive: &str) -> Option<CardComponent> {
        let mut lines = directive.lines();
        let head = lines.next()?.trim();
        let rest = head.strip_prefix(CARD_OPENER)?;
        let close = rest.find(']')?;
        let title = rest[..close].trim().to_string();
        let after_title = rest[close + 1..].trim();

        let attributes = if after_title.is_empty() {
            BTreeMap::new()
        } else {
            let inner = after_title.strip_prefix('{')?.strip_suffix('}')?;
            parse_attributes(inner)?
        };

        let mut body: Vec<&str> = lines.collect();
        if body.last().map(|line| line.trim()) == Some(CARD_CLOSER) {
            body.pop();
        }

        Some(CardComponent {
            title,
            attributes,
            body: body.join("\n").trim().to_string(),
        })
    }
}

fn parse_attributes(source: &str) -> Option<BTreeMap<String, String>> {
    let mut attributes = BTreeMap::new();
    let mut rest = source.trim_start();

    while !rest.is_empty() {
        let eq = rest.find('=')?;
        let key = rest[..eq].trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }
        let value_start = rest[eq + 1..].trim_start();
        let (value, remaining) = if let Some(quoted) = value_start.strip_prefix('"') {
            let end = quoted.find('"')?;
            (&quoted[..end], &quoted[end + 1..])
        } else {
            let end = value_start
                .find(char::is_whitespace)
                .unwrap_or(value_start.len());
            (&value_start[..end], &value_start[end..])
        };
        attributes.insert(key.to_string(), value.to_string());
        rest = remaining.trim_start();
    }

    Some(attributes)
}

/// Token text for the `index`th placeholder of a render.
pub fn placeholder_token(index: usize) -> String {
    format!("__CARD_PLACEHOLDER_{index}__")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderBinding {
    pub token: String,
    pub directive: String,
    pub component: CardComponent,
}

/// Token → component map for one render call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderBindings {
    bindings: Vec<PlaceholderBinding>,
}

impl PlaceholderBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a binding and return its freshly numbered token.
    pub fn bind(&mut self, directive: &str, component: CardComponent) -> String {
        let token = placeholder_token(self.bindings.len());
        self.bindings.push(PlaceholderBinding {
            token: token.clone(),
            directive: directive.to_string(),
            component,
        });
        token
    }

    pub fn get(&self, token: &str) -> Option<&CardComponent> {
        self.find(token).map(|binding| &binding.component)
    }

    pub fn directive_for(&self, token: &str) -> Option<&str> {
        self.find(token).map(|binding| binding.directive.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlaceholderBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn find(&self, token: &str) -> Option<&PlaceholderBinding> {
        let token = token.trim();
        self.bindings.iter().find(|binding| binding.token == token)
    }
}
