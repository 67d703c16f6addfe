//! Column layout geometry.
//!
//! Computes, per visible column, its sticky offset from the edge it is pinned
//! to and its stacking index, plus the aggregate pinned widths either side.

mod grid_layout;

pub use grid_layout::{
    body_height, pin_feasible, vertical_scroll_engaged, GridLayout, LayoutEntry,
    DEFAULT_CONTAINER_WIDTH, HEADER_HEIGHT, MAX_BODY_ROWS, MIN_SCROLL_SLACK, PIN_STACK_BASE,
    ROW_HEIGHT, UNPINNED_STACK,
};
