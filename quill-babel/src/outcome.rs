//! Observable result of a top-level conversion.

/// Result of one call to a public entry point.
///
/// Conversions never fail outright: when something goes wrong the original input
/// is handed back unchanged, and this type records that it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// The input was converted normally.
    Converted(String),
    /// An internal fault occurred; `original` is the untouched input.
    FallbackUsed { original: String, cause: String },
}

impl Conversion {
    /// The output text, whichever way it was produced.
    pub fn text(&self) -> &str {
        match self {
            Conversion::Converted(text) => text,
            Conversion::FallbackUsed { original, .. } => original,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Conversion::Converted(text) => text,
            Conversion::FallbackUsed { original, .. } => original,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Conversion::FallbackUsed { .. })
    }
}

/// Extract a readable message from a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
