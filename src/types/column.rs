use serde::{Deserialize, Serialize};

/// Default column width in width-units when the spec gives no override.
pub const DEFAULT_COL_WIDTH: u32 = 160;

/// Minimum column width a resize can reach.
pub const MIN_COL_WIDTH: u32 = 100;

/// Maximum column width a resize can reach.
pub const MAX_COL_WIDTH: u32 = 300;

/// Side of the scrollable region a column is pinned to.
///
/// A column is pinned to at most one side; this being a single field makes the
/// invariant structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinSide {
    #[default]
    None,
    Left,
    Right,
}

/// Static column identity and defaults, registered once at mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// Unique, stable key matching the row record field names.
    pub key: String,
    /// Display text for the header and export.
    pub label: String,
    /// Initial width override (defaults to [`DEFAULT_COL_WIDTH`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Lower resize bound override (defaults to [`MIN_COL_WIDTH`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    /// Upper resize bound override (defaults to [`MAX_COL_WIDTH`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
}

impl ColumnSpec {
    /// Spec with default widths.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: None,
            min_width: None,
            max_width: None,
        }
    }
}

/// A registered column: static identity plus mutable layout state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub key: String,
    pub label: String,
    /// Current width, always within `[min_width, max_width]`.
    pub width: u32,
    pub min_width: u32,
    pub max_width: u32,
    pub pin: PinSide,
    pub visible: bool,
    /// Width to restore on reset.
    default_width: u32,
}

impl Column {
    /// Build the initial column state from its spec.
    pub fn from_spec(spec: &ColumnSpec) -> Self {
        let min_width = spec.min_width.unwrap_or(MIN_COL_WIDTH);
        let max_width = spec.max_width.unwrap_or(MAX_COL_WIDTH).max(min_width);
        let default_width = spec
            .width
            .unwrap_or(DEFAULT_COL_WIDTH)
            .clamp(min_width, max_width);
        Self {
            key: spec.key.clone(),
            label: spec.label.clone(),
            width: default_width,
            min_width,
            max_width,
            pin: PinSide::None,
            visible: true,
            default_width,
        }
    }

    /// Clamp a requested width into this column's bounds.
    pub fn clamp_width(&self, width: u32) -> u32 {
        width.clamp(self.min_width, self.max_width)
    }

    /// Restore spec defaults: unpinned, visible, default width.
    pub fn reset(&mut self) {
        self.pin = PinSide::None;
        self.visible = true;
        self.width = self.default_width;
    }
}
