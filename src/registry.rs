//! Column registry: the catalog of column identity and mutable layout state.
//!
//! Created once at mount from a static schema and mutated only by user
//! actions (pin/unpin/resize/show/hide/reset). Every mutation bumps a version
//! counter that keys the layout cache.

use crate::error::{GridError, Result};
use crate::types::{Column, ColumnSpec, PinSide};

/// Registered columns in registration order, plus a mutation version.
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    columns: Vec<Column>,
    version: u64,
}

impl ColumnRegistry {
    /// Build the registry from the static schema. Keys must be unique.
    pub fn new(specs: &[ColumnSpec]) -> Result<Self> {
        let mut columns: Vec<Column> = Vec::with_capacity(specs.len());
        for spec in specs {
            if columns.iter().any(|c| c.key == spec.key) {
                return Err(GridError::DuplicateColumn(spec.key.clone()));
            }
            columns.push(Column::from_spec(spec));
        }
        Ok(Self {
            columns,
            version: 0,
        })
    }

    /// Monotonic mutation counter; cache keys derive from it.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// All columns in registration order, hidden included.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// All registered keys in registration order (search scope).
    pub fn keys(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.key.clone()).collect()
    }

    /// Look up a column by key.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    fn get_mut(&mut self, key: &str) -> Result<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))
    }

    /// The ordered column list: visible left-pinned, then visible unpinned,
    /// then visible right-pinned, each group in registration order.
    ///
    /// Single source of truth for both visual layout and export order.
    pub fn ordered_visible(&self) -> Vec<&Column> {
        let visible = |pin: PinSide| {
            self.columns
                .iter()
                .filter(move |c| c.visible && c.pin == pin)
        };
        visible(PinSide::Left)
            .chain(visible(PinSide::None))
            .chain(visible(PinSide::Right))
            .collect()
    }

    /// Total width of visible columns pinned to `side`.
    pub fn pinned_width(&self, side: PinSide) -> u32 {
        self.columns
            .iter()
            .filter(|c| c.visible && c.pin == side)
            .map(|c| c.width)
            .sum()
    }

    /// Pin a column to one side; pinning clears any previous side.
    ///
    /// Feasibility against the container width is checked by the layout
    /// module before this is called.
    pub fn set_pin(&mut self, key: &str, side: PinSide) -> Result<()> {
        let col = self.get_mut(key)?;
        if col.pin != side {
            col.pin = side;
            self.version += 1;
        }
        Ok(())
    }

    /// Set a column's width, clamped into its `[min, max]` bounds.
    /// Returns the width actually stored.
    pub fn set_width(&mut self, key: &str, width: u32) -> Result<u32> {
        let col = self.get_mut(key)?;
        let clamped = col.clamp_width(width);
        if col.width != clamped {
            col.width = clamped;
            self.version += 1;
        }
        Ok(clamped)
    }

    /// Show or hide a column. Hiding a pinned column removes it from offset
    /// accounting; the pin side itself is kept for when it is shown again.
    pub fn set_visible(&mut self, key: &str, visible: bool) -> Result<()> {
        let col = self.get_mut(key)?;
        if col.visible != visible {
            col.visible = visible;
            self.version += 1;
        }
        Ok(())
    }

    /// Restore every column to its spec defaults.
    pub fn reset(&mut self) {
        for col in &mut self.columns {
            col.reset();
        }
        self.version += 1;
    }
}
