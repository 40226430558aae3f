//! Knobs for the two conversion directions.

/// Options for Markdown → HTML rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix for the cosmetic CSS classes (`md` gives `md-paragraph`, ...).
    /// An empty prefix omits class attributes entirely.
    pub class_prefix: String,
    /// Deepest `#` heading recognized; deeper markers stay paragraph text.
    pub max_heading_level: u8,
    /// Drop a leading `---` frontmatter block before rendering.
    pub strip_frontmatter: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            class_prefix: "md".to_string(),
            max_heading_level: 3,
            strip_frontmatter: true,
        }
    }
}

impl RenderOptions {
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    pub fn with_max_heading_level(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Full class name for a styled element, or `None` when classes are disabled.
    pub(crate) fn class(&self, name: &str) -> Option<String> {
        if self.class_prefix.is_empty() {
            None
        } else {
            Some(format!("{}-{name}", self.class_prefix))
        }
    }
}

/// Options for HTML → Markdown serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Marker for unordered list items (`-`, `*` or `+`).
    pub bullet_marker: char,
    /// Marker for emphasis (`*` or `_`). Strong emphasis always uses `**`.
    pub emphasis_marker: char,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            bullet_marker: '-',
            emphasis_marker: '*',
        }
    }
}
