//! Computed column layout: sticky offsets, stacking order, pinned totals.
//!
//! A pure function of the ordered column list and the container width.
//! Recomputed whenever either input changes; callers memoize keyed by the
//! registry version and container width.

use serde::Serialize;

use crate::registry::ColumnRegistry;
use crate::types::PinSide;

/// Minimum scrollable width reserved when pinning, so pinned columns can
/// never consume the entire viewport.
pub const MIN_SCROLL_SLACK: u32 = 100;

/// Container width assumed until the first container-resize event.
pub const DEFAULT_CONTAINER_WIDTH: u32 = 800;

/// Stacking tier floor for pinned columns. Pinned columns stack at
/// `PIN_STACK_BASE + n` (n ≥ 1, higher nearer the pinned edge), so every
/// pinned column paints above scrolling content.
pub const PIN_STACK_BASE: u32 = 10;

/// Stacking index of unpinned columns, below [`PIN_STACK_BASE`].
pub const UNPINNED_STACK: u32 = 1;

/// Height of one body row in layout units.
pub const ROW_HEIGHT: u32 = 36;

/// Height of the header row in layout units.
pub const HEADER_HEIGHT: u32 = 40;

/// Row count above which the body scrolls vertically instead of growing.
pub const MAX_BODY_ROWS: usize = 10;

/// Layout output for one visible column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry {
    pub key: String,
    pub label: String,
    pub width: u32,
    pub pin: PinSide,
    /// Distance from the pinned edge; `None` for unpinned columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Paint priority; higher renders above lower where columns overlap.
    pub stack_index: u32,
}

/// Computed layout for the whole grid.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    /// One entry per visible column, in ordered-list order.
    pub entries: Vec<LayoutEntry>,
    /// Total width of visible left-pinned columns.
    pub left_width: u32,
    /// Total width of visible right-pinned columns.
    pub right_width: u32,
    pub container_width: u32,
}

impl GridLayout {
    /// Compute the layout from current registry state.
    ///
    /// Left-pinned columns accumulate offsets in list order (first column at
    /// offset 0); right-pinned columns accumulate in reverse list order so
    /// the column nearest the right edge sits at offset 0. Offsets per side
    /// tile `[0, side_total)` with no gaps or overlaps.
    pub fn compute(registry: &ColumnRegistry, container_width: u32) -> Self {
        let ordered = registry.ordered_visible();

        let left_count = ordered.iter().filter(|c| c.pin == PinSide::Left).count();
        let right_count = ordered.iter().filter(|c| c.pin == PinSide::Right).count();

        // Right offsets accumulate from the far end of the list.
        let mut right_running: u32 = ordered
            .iter()
            .filter(|c| c.pin == PinSide::Right)
            .map(|c| c.width)
            .sum();
        let right_width = right_running;

        let mut left_running: u32 = 0;
        let mut left_pos: usize = 0;
        let mut right_pos: usize = 0;

        let mut entries = Vec::with_capacity(ordered.len());
        for col in &ordered {
            let (offset, stack_index) = match col.pin {
                PinSide::Left => {
                    let offset = left_running;
                    left_running += col.width;
                    let stack = PIN_STACK_BASE + stack_above(left_count, left_pos);
                    left_pos += 1;
                    (Some(offset), stack)
                }
                PinSide::Right => {
                    // This column's near edge sits behind every right-pinned
                    // column after it in list order.
                    right_running -= col.width;
                    let offset = right_running;
                    let from_edge = right_count - 1 - right_pos;
                    let stack = PIN_STACK_BASE + stack_above(right_count, from_edge);
                    right_pos += 1;
                    (Some(offset), stack)
                }
                PinSide::None => (None, UNPINNED_STACK),
            };
            entries.push(LayoutEntry {
                key: col.key.clone(),
                label: col.label.clone(),
                width: col.width,
                pin: col.pin,
                offset,
                stack_index,
            });
        }

        GridLayout {
            entries,
            left_width: left_running,
            right_width,
            container_width,
        }
    }

    /// Width left for the scrolling region between the pinned flanks.
    pub fn scrollable_width(&self) -> u32 {
        self.container_width
            .saturating_sub(self.left_width + self.right_width)
    }

    /// Entry lookup by column key.
    pub fn entry(&self, key: &str) -> Option<&LayoutEntry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

/// Stack increment for the pinned column at `position` among `count` columns
/// on its side, counted from the pinned edge (position 0 = nearest).
fn stack_above(count: usize, position: usize) -> u32 {
    u32::try_from(count.saturating_sub(position)).unwrap_or(u32::MAX)
}

/// Whether pinning `key` would still leave [`MIN_SCROLL_SLACK`] of
/// scrollable width in the container.
///
/// The hypothetical total is the current visible pinned width on both sides,
/// minus the candidate if it is already pinned, plus the candidate at its
/// current width. Rejection surfaces as a disabled control, never a fault.
pub fn pin_feasible(registry: &ColumnRegistry, container_width: u32, key: &str) -> bool {
    let Some(candidate) = registry.get(key) else {
        return false;
    };
    let pinned = registry.pinned_width(PinSide::Left) + registry.pinned_width(PinSide::Right);
    let already = if candidate.visible && candidate.pin != PinSide::None {
        candidate.width
    } else {
        0
    };
    let hypothetical = pinned - already + candidate.width;
    hypothetical + MIN_SCROLL_SLACK <= container_width
}

/// Body height for `rows` visible rows. Grows with content up to
/// [`MAX_BODY_ROWS`] rows, after which vertical scrolling engages.
pub fn body_height(rows: usize) -> u32 {
    let shown = rows.min(MAX_BODY_ROWS);
    HEADER_HEIGHT + ROW_HEIGHT * u32::try_from(shown).unwrap_or(u32::MAX)
}

/// True when the body needs a vertical scrollbar.
pub fn vertical_scroll_engaged(rows: usize) -> bool {
    rows > MAX_BODY_ROWS
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::ColumnSpec;

    fn registry(keys: &[&str]) -> ColumnRegistry {
        let specs: Vec<ColumnSpec> = keys
            .iter()
            .map(|k| ColumnSpec::new(*k, k.to_uppercase()))
            .collect();
        ColumnRegistry::new(&specs).unwrap()
    }

    #[test]
    fn test_unpinned_columns_have_no_offset() {
        let reg = registry(&["a", "b"]);
        let layout = GridLayout::compute(&reg, 800);
        assert_eq!(layout.entries.len(), 2);
        for entry in &layout.entries {
            assert_eq!(entry.offset, None);
            assert_eq!(entry.stack_index, UNPINNED_STACK);
        }
        assert_eq!(layout.left_width, 0);
        assert_eq!(layout.right_width, 0);
    }

    #[test]
    fn test_left_offsets_accumulate_in_order() {
        let mut reg = registry(&["a", "b", "c"]);
        reg.set_pin("a", PinSide::Left).unwrap();
        reg.set_pin("b", PinSide::Left).unwrap();
        let layout = GridLayout::compute(&reg, 800);
        assert_eq!(layout.entry("a").unwrap().offset, Some(0));
        assert_eq!(layout.entry("b").unwrap().offset, Some(160));
        assert_eq!(layout.left_width, 320);
    }

    #[test]
    fn test_right_offsets_accumulate_from_the_edge() {
        let mut reg = registry(&["a", "b", "c"]);
        reg.set_pin("b", PinSide::Right).unwrap();
        reg.set_pin("c", PinSide::Right).unwrap();
        let layout = GridLayout::compute(&reg, 800);
        // "c" is last in list order, so nearest the right edge.
        assert_eq!(layout.entry("c").unwrap().offset, Some(0));
        assert_eq!(layout.entry("b").unwrap().offset, Some(160));
        assert_eq!(layout.right_width, 320);
    }

    #[test]
    fn test_stacking_order_favors_edge_columns() {
        let mut reg = registry(&["a", "b", "c"]);
        reg.set_pin("a", PinSide::Left).unwrap();
        reg.set_pin("b", PinSide::Left).unwrap();
        let layout = GridLayout::compute(&reg, 800);
        let a = layout.entry("a").unwrap().stack_index;
        let b = layout.entry("b").unwrap().stack_index;
        let c = layout.entry("c").unwrap().stack_index;
        assert!(a > b, "edge-nearest left column stacks highest");
        assert!(b > PIN_STACK_BASE);
        assert_eq!(c, UNPINNED_STACK);
    }

    #[test]
    fn test_hidden_pinned_column_not_counted() {
        let mut reg = registry(&["a", "b", "c"]);
        reg.set_pin("a", PinSide::Left).unwrap();
        reg.set_pin("b", PinSide::Left).unwrap();
        reg.set_visible("a", false).unwrap();
        let layout = GridLayout::compute(&reg, 800);
        assert_eq!(layout.entry("a"), None);
        assert_eq!(layout.entry("b").unwrap().offset, Some(0));
        assert_eq!(layout.left_width, 160);
    }

    #[test]
    fn test_pin_feasibility_boundary() {
        let mut reg = registry(&["a", "b", "c"]);
        reg.set_pin("a", PinSide::Left).unwrap();
        // 160 (pinned) + 160 (candidate) + 100 (slack) = 420
        assert!(pin_feasible(&reg, 420, "b"));
        assert!(!pin_feasible(&reg, 419, "b"));
    }

    #[test]
    fn test_repinning_does_not_double_count() {
        let mut reg = registry(&["a", "b"]);
        reg.set_pin("a", PinSide::Left).unwrap();
        // Moving "a" to the other side keeps the total at one width.
        assert!(pin_feasible(&reg, 260, "a"));
    }

    #[test]
    fn test_unknown_candidate_is_not_pinnable() {
        let reg = registry(&["a"]);
        assert!(!pin_feasible(&reg, 10_000, "zzz"));
    }

    #[test]
    fn test_scrollable_width_saturates() {
        let mut reg = registry(&["a", "b"]);
        reg.set_pin("a", PinSide::Left).unwrap();
        reg.set_pin("b", PinSide::Right).unwrap();
        let layout = GridLayout::compute(&reg, 200);
        assert_eq!(layout.scrollable_width(), 0);
    }

    #[test]
    fn test_body_height_caps_at_max_rows() {
        assert_eq!(body_height(3), HEADER_HEIGHT + 3 * ROW_HEIGHT);
        assert_eq!(body_height(10), HEADER_HEIGHT + 10 * ROW_HEIGHT);
        assert_eq!(body_height(500), HEADER_HEIGHT + 10 * ROW_HEIGHT);
        assert!(!vertical_scroll_engaged(10));
        assert!(vertical_scroll_engaged(11));
    }
}
