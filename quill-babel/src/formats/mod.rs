//! Format implementations
//!
//! One module per side of the conversion: `markdown` reads Markdown into blocks
//! and writes node trees back out; `html` renders blocks to HTML and reads HTML
//! into node trees.

pub mod html;
pub mod markdown;

pub use html::{parse_html, render_card, Rendered, Renderer};
pub use markdown::Serializer;
