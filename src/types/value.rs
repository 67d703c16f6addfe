use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single cell value as carried by a fetched row record.
///
/// Row records arrive as JSON objects; nested arrays/objects are flattened to
/// their JSON text since the grid only ever displays and compares scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl CellValue {
    /// True for `Null` (the value every missing field reads as).
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Display string used for search, `like`/`in` matching, and export.
    ///
    /// `Null` stringifies to the empty string; integral numbers print without
    /// a decimal point (f64 `Display` already does the right thing).
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Str(s) => s.clone(),
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(CellValue::Null, CellValue::Number),
            serde_json::Value::String(s) => CellValue::Str(s),
            other => CellValue::Str(other.to_string()),
        }
    }
}

static NULL_VALUE: CellValue = CellValue::Null;

/// One row of the dataset, keyed by internal column keys.
///
/// Fields absent from the map read as [`CellValue::Null`], which is what every
/// filter operator except `is null` evaluates false against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row(HashMap<String, CellValue>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Value under `key`, or `Null` if the field is absent.
    pub fn get(&self, key: &str) -> &CellValue {
        self.0.get(key).unwrap_or(&NULL_VALUE)
    }

    /// Set a field value.
    pub fn set(&mut self, key: impl Into<String>, value: CellValue) {
        self.0.insert(key.into(), value);
    }

    /// Number of populated fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no field is populated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
