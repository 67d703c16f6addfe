//! Row-record ingestion from the remote collaborator.
//!
//! The source is invoked exactly once at mount with no parameters: no retry,
//! no cancellation, no re-query on filter changes (all slicing is
//! client-side). Records arrive as JSON objects and pass through a fixed
//! remote-field to column-key mapping.

use crate::error::{GridError, Result};
use crate::types::Row;

/// Supplies the raw row records. Implementations wrap whatever transport the
/// host uses; the engine only sees the delivered array (or one error).
pub trait RowSource {
    fn fetch(&mut self) -> Result<Vec<serde_json::Value>>;
}

/// Outcome of the one-shot fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// No fetch has happened yet.
    #[default]
    Pending,
    Loaded,
    /// Fetch failed; the message is shown inline and the body stays empty.
    Failed(String),
}

impl FetchState {
    /// The inline error message, if the fetch failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Fixed mapping from remote field names to internal column keys.
///
/// Fields without a mapping entry keep their remote name, so an empty map is
/// the identity.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Identity mapping: remote field names are already column keys.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Add one remote-field → column-key entry (builder style).
    pub fn map(mut self, remote: impl Into<String>, key: impl Into<String>) -> Self {
        self.entries.push((remote.into(), key.into()));
        self
    }

    fn key_for<'a>(&'a self, remote: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(r, _)| r == remote)
            .map_or(remote, |(_, k)| k.as_str())
    }

    /// Convert one JSON record into a [`Row`].
    pub fn apply(&self, record: &serde_json::Value) -> Result<Row> {
        let Some(object) = record.as_object() else {
            return Err(GridError::Record(format!(
                "expected a JSON object, got {record}"
            )));
        };
        let mut row = Row::new();
        for (field, value) in object {
            row.set(self.key_for(field), value.clone().into());
        }
        Ok(row)
    }

    /// Convert a whole fetched batch.
    pub fn apply_all(&self, records: &[serde_json::Value]) -> Result<Vec<Row>> {
        records.iter().map(|r| self.apply(r)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::CellValue;
    use serde_json::json;

    #[test]
    fn test_identity_map_passes_fields_through() {
        let row = FieldMap::identity()
            .apply(&json!({"name": "Ada", "age": 30}))
            .unwrap();
        assert_eq!(row.get("name"), &CellValue::Str("Ada".into()));
        assert_eq!(row.get("age"), &CellValue::Number(30.0));
    }

    #[test]
    fn test_mapping_renames_remote_fields() {
        let map = FieldMap::identity()
            .map("user_name", "name")
            .map("user_age", "age");
        let row = map
            .apply(&json!({"user_name": "Ada", "user_age": 30, "extra": true}))
            .unwrap();
        assert_eq!(row.get("name"), &CellValue::Str("Ada".into()));
        assert_eq!(row.get("age"), &CellValue::Number(30.0));
        // Unmapped fields keep their remote name.
        assert_eq!(row.get("extra"), &CellValue::Bool(true));
    }

    #[test]
    fn test_non_object_record_is_an_error() {
        let err = FieldMap::identity().apply(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, GridError::Record(_)));
    }

    #[test]
    fn test_fetch_state_error_accessor() {
        assert_eq!(FetchState::Pending.error(), None);
        assert_eq!(FetchState::Loaded.error(), None);
        assert_eq!(
            FetchState::Failed("boom".into()).error(),
            Some("boom")
        );
    }
}
