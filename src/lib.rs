//! gridstate - grid state engine for column-heavy tabular views
//!
//! Computes everything a data-grid surface needs short of painting it:
//! - Column layout with pinnable (frozen) columns: sticky offsets, stacking
//!   order, pinned totals, pin feasibility against the container width
//! - Interactive column resizing with clamping
//! - A declarative filter pipeline (per-rule connectives, sequential fold)
//!   plus free-text search
//! - Stable multi-key sorting and pagination
//! - Export projection in exact on-screen column order
//!
//! Rendering, data transport, and export byte encoding stay outside; the
//! engine exchanges plain numbers, rows, and tables with them.
//!
//! # Usage
//!
//! ```
//! use gridstate::{ColumnSpec, GridView, PinSide};
//!
//! let mut grid = GridView::new(&[
//!     ColumnSpec::new("id", "ID"),
//!     ColumnSpec::new("name", "Name"),
//! ])?;
//! grid.pin_column("id", PinSide::Left)?;
//! let layout = grid.layout();
//! assert_eq!(layout.entries.first().and_then(|e| e.offset), Some(0));
//! # Ok::<(), gridstate::GridError>(())
//! ```

// Data model
pub mod error;
pub mod types;

// Engine components
pub mod export;
pub mod filter;
pub mod interaction;
pub mod layout;
pub mod paginate;
pub mod pipeline;
pub mod registry;
pub mod resize;
pub mod sort;
pub mod source;

// Controller tying the pieces together
pub mod view;

pub use error::{GridError, Result};
pub use export::{ExportEncoder, ExportFormat, ExportTable};
pub use interaction::{GridEvent, UiState};
pub use layout::{GridLayout, LayoutEntry};
pub use registry::ColumnRegistry;
pub use resize::ResizeController;
pub use source::{FetchState, FieldMap, RowSource};
pub use types::*;
pub use view::GridView;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
