//! Markdown ⇄ HTML conversion core for a dual-mode editor
//!
//!     This crate turns stored Markdown into styled HTML for visual editing, and turns the
//!     edited HTML back into canonical Markdown for storage. The two directions are meant to
//!     be inverses of each other closely enough that a document can go back and forth
//!     between the two editing modes without drifting.
//!
//!     This is a pure lib: it powers quill-cli but is shell agnostic. No code here reads env
//!     vars, prints or touches the filesystem.
//!
//! Architecture
//!
//!     Markdown → HTML: a line-based block scanner (./formats/markdown/parser.rs) produces a
//!     `Vec<Block>` (./ir/nodes.rs), each block's text goes through the inline parser
//!     (./common/inline.rs), and the blocks are built into RcDom subtrees and serialized by
//!     html5ever (./formats/html/serializer.rs).
//!
//!     HTML → Markdown: html5ever parses the HTML (malformed input is repaired, never
//!     rejected), the DOM is lowered into the closed `Node` enum (./ir/tree.rs,
//!     ./formats/html/parser.rs), and a recursive walk writes Markdown
//!     (./formats/markdown/serializer.rs).
//!
//!     The custom constructs live in ./common and are shared by both directions:
//!     tables with rich-text cells, chart fences, card directives, frontmatter.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── options.rs              # RenderOptions / SerializeOptions
//!     ├── outcome.rs              # Conversion (converted or fallback)
//!     ├── formats
//!     │   ├── html                # renderer, HTML parser, DOM helpers
//!     │   └── markdown            # block scanner, Markdown writer
//!     ├── ir                      # Block / Inline and Node trees
//!     └── common                  # table, chart, card, frontmatter, inline, whitespace
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── render
//!     ├── serialize
//!     ├── table
//!     └── common                  # shared helpers
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Failure Model
//!
//!     The two entry points never fail. Internal errors and panics are caught at the boundary,
//!     logged through `tracing`, and the caller gets its input back, marked as
//!     `Conversion::FallbackUsed` for those who want to know. Content problems (a chart whose
//!     payload is not JSON, a table without a header) produce visible artifacts in the output
//!     rather than errors.
//!
//! Round Tripping
//!
//!     Markdown → HTML → Markdown is idempotent after the first pass: the first serialization
//!     normalizes (list markers, blank lines, quote lines), after that the text is stable.
//!     CSS classes are cosmetic and ignored when reading HTML back; structure is recovered from
//!     tag names and `data-*` attributes only.
//!
pub mod error;
pub mod formats;
pub mod options;
pub mod outcome;

pub mod common;
pub mod ir;

pub use common::card::{
    CardComponent, CardDirective, CardDirectiveParser, DirectiveCardParser, PlaceholderBinding,
    PlaceholderBindings,
};
pub use common::chart::{ChartBlock, ChartData, InvalidChart};
pub use common::frontmatter::{parse_frontmatter, strip_frontmatter, Frontmatter, FrontmatterValue};
pub use common::table::{
    html_to_table, parse_table, serialize_table, table_to_html, validate_table, CellContent,
    CellRun, TableValidation, TableValue,
};
pub use error::ConvertError;
pub use formats::{parse_html, render_card, Rendered, Renderer, Serializer};
pub use ir::tree::Node;
pub use options::{RenderOptions, SerializeOptions};
pub use outcome::Conversion;

/// Render Markdown to HTML with default options.
///
/// Never fails: on an internal fault the Markdown is returned unchanged.
pub fn render(markdown: &str) -> String {
    Renderer::default().render(markdown).output.into_text()
}

/// Serialize a node tree to Markdown with default options.
///
/// On an internal fault the tree's plain text is returned.
pub fn serialize(node: &Node) -> String {
    Serializer::default().serialize(node).into_text()
}

/// Parse HTML and serialize it to Markdown with default options.
///
/// On an internal fault the HTML is returned unchanged.
pub fn html_to_markdown(html: &str) -> String {
    Serializer::default().serialize_html(html).into_text()
}
