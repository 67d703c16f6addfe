//! Structured error types for gridstate.
//!
//! Engine failures are local and non-fatal by design (rejected pins disable a
//! control, incomplete filter rules are ignored, out-of-bounds resizes are
//! clamped); `GridError` covers API misuse and collaborator failures only.

/// All errors that can occur in the grid state engine.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A column key not present in the registry was named in an operation.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Two column specs were registered under the same key.
    #[error("Duplicate column key: {0}")]
    DuplicateColumn(String),

    /// The row source collaborator failed to deliver records.
    #[error("Row source: {0}")]
    Source(String),

    /// A fetched row record was not a JSON object.
    #[error("Invalid row record: {0}")]
    Record(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for string errors at collaborator boundaries.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
