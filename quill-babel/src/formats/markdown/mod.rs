//! Markdown side of the conversion
//!
//! `parser` scans Markdown into [`Block`](crate::ir::nodes::Block)s for the
//! renderer; `serializer` writes a [`Node`] tree back out as Markdown.
//!
//! # Lossy Conversions
//!
//! - Nested lists flatten into their parent item's text
//! - Blockquotes collapse to a single line
//! - `<br>` becomes a plain newline inside its paragraph
//! - Card placeholders with no directive in `data-content` or in the render's
//!   bindings are dropped
//! - 3+ consecutive newlines outside fenced code collapse to one blank line

pub mod parser;
pub mod serializer;

use crate::common::card::PlaceholderBindings;
use crate::error::ConvertError;
use crate::formats::html::parse_html;
use crate::ir::tree::Node;
use crate::options::SerializeOptions;
use crate::outcome::{panic_message, Conversion};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// HTML / `Node` → Markdown serializer.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    options: SerializeOptions,
    bindings: Option<PlaceholderBindings>,
}

impl Serializer {
    pub fn new(options: SerializeOptions) -> Self {
        Self {
            options,
            bindings: None,
        }
    }

    /// Resolve card tokens that carry no `data-content` through the bindings of
    /// the render that produced them.
    pub fn with_bindings(mut self, bindings: PlaceholderBindings) -> Self {
        self.bindings = Some(bindings);
        self
    }

    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Serialize a tree; on failure the tree's plain text is returned.
    pub fn serialize(&self, node: &Node) -> Conversion {
        self.guarded(|| self.try_serialize(node), || node.text_content())
    }

    /// Parse and serialize HTML; on failure the HTML is returned unchanged.
    pub fn serialize_html(&self, html: &str) -> Conversion {
        self.guarded(|| self.try_serialize_html(html), || html.to_string())
    }

    pub fn try_serialize(&self, node: &Node) -> Result<String, ConvertError> {
        Ok(serializer::serialize_to_markdown(
            node,
            &self.options,
            self.bindings.as_ref(),
        ))
    }

    pub fn try_serialize_html(&self, html: &str) -> Result<String, ConvertError> {
        self.try_serialize(&parse_html(html))
    }

    fn guarded(
        &self,
        convert: impl FnOnce() -> Result<String, ConvertError>,
        original: impl FnOnce() -> String,
    ) -> Conversion {
        let result = catch_unwind(AssertUnwindSafe(convert))
            .unwrap_or_else(|payload| Err(ConvertError::Internal(panic_message(payload.as_ref()))));

        match result {
            Ok(markdown) => Conversion::Converted(markdown),
            Err(e) => {
                tracing::warn!(error = %e, "markdown serialization failed, returning input");
                Conversion::FallbackUsed {
                    original: original(),
                    cause: e.to_string(),
                }
            }
        }
    }
}
