//! Intermediate representations shared by both conversion directions.
//!
//! - [`nodes`]: the typed Markdown AST produced by the block scanner (forward direction).
//! - [`tree`]: the HTML-side [`tree::Node`] tree walked by the serializer (reverse direction).

pub mod nodes;
pub mod tree;

/// Deepest nesting the recursive walks descend into. Anything below is kept
/// as flat text so hostile input cannot exhaust the stack.
pub(crate) const MAX_NESTING: usize = 128;
