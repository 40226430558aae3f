//! Error types for conversion operations

use thiserror::Error;

/// Errors that can occur inside a conversion.
///
/// These never cross the public entry points [`crate::render`] and
/// [`crate::serialize`]; they are turned into [`crate::Conversion::FallbackUsed`]
/// there. Lower-level helpers (table HTML export, DOM serialization) return them
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Error while turning a DOM tree into an HTML string
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error while reading input
    #[error("Parse error: {0}")]
    Parse(String),
    /// An unexpected fault (e.g. a panic caught at an entry point)
    #[error("Internal error: {0}")]
    Internal(String),
}
