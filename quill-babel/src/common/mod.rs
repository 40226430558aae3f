//! Format-agnostic codecs shared by the renderer and the serializer.

pub mod card;
pub mod chart;
pub mod frontmatter;
pub mod inline;
pub mod table;
pub mod whitespace;
