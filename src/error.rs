//! Structured error types for xlgrid.
//!
//! Grid and store operations never fail: unknown rows, fields and coordinates
//! are silently ignored. Only the clipboard boundary and option parsing
//! surface errors.

/// All errors that can occur at the grid's fallible boundaries.
#[derive(Debug, thiserror::Error)]
pub enum XlgridError {
    /// No clipboard capability is available in this environment.
    #[error("Clipboard is not available in this environment")]
    ClipboardUnavailable,

    /// The clipboard backend rejected a read or write.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// JSON (de)serialization error from serde_json.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Grid options could not be interpreted.
    #[error("Invalid grid options: {0}")]
    InvalidOptions(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlgridError>;

impl From<String> for XlgridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for XlgridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<XlgridError> for wasm_bindgen::JsValue {
    fn from(e: XlgridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
