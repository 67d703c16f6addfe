//! Export projection: deciding which columns, in which order, with which
//! values feed an external encoder.
//!
//! Byte production (PDF/spreadsheet/CSV) belongs to the encoder
//! collaborators; the engine only projects the currently visible, currently
//! ordered columns over the filtered+sorted rows.

use serde::Serialize;

use crate::error::Result;
use crate::types::{Column, Row};

/// Output document family. File names are fixed per format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportFormat {
    Document,
    Spreadsheet,
    Delimited,
}

impl ExportFormat {
    /// The fixed download file name for this format.
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Document => "export.pdf",
            ExportFormat::Spreadsheet => "export.xlsx",
            ExportFormat::Delimited => "export.csv",
        }
    }
}

/// Header labels plus stringified row values, in on-screen column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Encoder collaborator: turns a projected table into one format's bytes.
pub trait ExportEncoder {
    fn encode(&self, table: &ExportTable) -> Result<Vec<u8>>;
}

/// Project `rows` over the ordered visible columns.
///
/// The column slice must come from the registry's ordered visible list so
/// the export can never include a hidden column or disagree with the active
/// pin/order state.
pub fn project(rows: &[&Row], columns: &[&Column]) -> ExportTable {
    let headers = columns.iter().map(|c| c.label.clone()).collect();
    let rows = rows
        .iter()
        .map(|row| columns.iter().map(|c| row.get(&c.key).display()).collect())
        .collect();
    ExportTable { headers, rows }
}
