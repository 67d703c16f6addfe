//! Interactive column-width adjustment.
//!
//! A two-state machine spanning pointer-down → pointer-move… → pointer-up.
//! While a drag is active it owns exclusive write access to one column's
//! width; the view controller refuses other registry mutations until the
//! drag ends and re-enables them on every exit path, including abnormal ones
//! (pointer capture lost).

use log::debug;

use crate::registry::ColumnRegistry;

/// Drag state. `anchor_x` and `anchor_width` are captured at pointer-down.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum ResizeState {
    #[default]
    Idle,
    Resizing {
        key: String,
        anchor_x: i64,
        anchor_width: u32,
    },
}

/// Width-drag state machine feeding clamped width mutations into the
/// registry.
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    state: ResizeState,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no drag is in progress.
    pub fn is_idle(&self) -> bool {
        self.state == ResizeState::Idle
    }

    /// Key of the column being resized, if any.
    pub fn active_column(&self) -> Option<&str> {
        match &self.state {
            ResizeState::Idle => None,
            ResizeState::Resizing { key, .. } => Some(key),
        }
    }

    /// Pointer-down on a column's edge handle. Only transitions from idle,
    /// and only for a registered visible column. Returns whether the drag
    /// started.
    pub fn begin(&mut self, registry: &ColumnRegistry, key: &str, pointer_x: i64) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(col) = registry.get(key).filter(|c| c.visible) else {
            return false;
        };
        debug!("resize start: column={key} anchor_x={pointer_x} width={}", col.width);
        self.state = ResizeState::Resizing {
            key: key.to_string(),
            anchor_x: pointer_x,
            anchor_width: col.width,
        };
        true
    }

    /// Pointer-move. Writes `clamp(anchor_width + (x − anchor_x), min, max)`
    /// into the registry synchronously. Returns the stored width, or `None`
    /// when idle.
    pub fn update(&mut self, registry: &mut ColumnRegistry, pointer_x: i64) -> Option<u32> {
        let ResizeState::Resizing {
            key,
            anchor_x,
            anchor_width,
        } = &self.state
        else {
            return None;
        };
        let desired = i64::from(*anchor_width) + (pointer_x - anchor_x);
        let desired = u32::try_from(desired.max(0)).unwrap_or(u32::MAX);
        // set_width clamps into the column's [min, max].
        registry.set_width(key, desired).ok()
    }

    /// Pointer-up: commit and return to idle.
    pub fn finish(&mut self) {
        if !self.is_idle() {
            debug!("resize end: column={:?}", self.active_column());
            self.state = ResizeState::Idle;
        }
    }

    /// Abnormal termination (pointer capture lost, surface left). Same exit
    /// as [`finish`](Self::finish); the width already written stays.
    pub fn abort(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::ColumnSpec;

    fn registry() -> ColumnRegistry {
        ColumnRegistry::new(&[ColumnSpec::new("a", "A"), ColumnSpec::new("b", "B")]).unwrap()
    }

    #[test]
    fn test_begin_only_from_idle() {
        let reg = registry();
        let mut ctl = ResizeController::new();
        assert!(ctl.begin(&reg, "a", 500));
        assert!(!ctl.begin(&reg, "b", 600));
        assert_eq!(ctl.active_column(), Some("a"));
    }

    #[test]
    fn test_begin_rejects_unknown_and_hidden() {
        let mut reg = registry();
        reg.set_visible("b", false).unwrap();
        let mut ctl = ResizeController::new();
        assert!(!ctl.begin(&reg, "zzz", 0));
        assert!(!ctl.begin(&reg, "b", 0));
        assert!(ctl.is_idle());
    }

    #[test]
    fn test_drag_writes_clamped_widths() {
        let mut reg = registry();
        let mut ctl = ResizeController::new();
        assert!(ctl.begin(&reg, "a", 1000));
        // 160 + 40
        assert_eq!(ctl.update(&mut reg, 1040), Some(200));
        // 160 - 110 clamps to min 100
        assert_eq!(ctl.update(&mut reg, 890), Some(100));
        // 160 + 400 clamps to max 300
        assert_eq!(ctl.update(&mut reg, 1400), Some(300));
        ctl.finish();
        assert_eq!(reg.get("a").unwrap().width, 300);
    }

    #[test]
    fn test_moves_are_anchor_relative_not_cumulative() {
        let mut reg = registry();
        let mut ctl = ResizeController::new();
        assert!(ctl.begin(&reg, "a", 0));
        ctl.update(&mut reg, 100);
        // Back to the anchor restores the anchor width.
        assert_eq!(ctl.update(&mut reg, 0), Some(160));
    }

    #[test]
    fn test_update_when_idle_is_noop() {
        let mut reg = registry();
        let mut ctl = ResizeController::new();
        assert_eq!(ctl.update(&mut reg, 50), None);
        assert_eq!(reg.get("a").unwrap().width, 160);
    }

    #[test]
    fn test_abort_returns_to_idle() {
        let mut reg = registry();
        let mut ctl = ResizeController::new();
        assert!(ctl.begin(&reg, "a", 0));
        ctl.update(&mut reg, 60);
        ctl.abort();
        assert!(ctl.is_idle());
        // Width written during the drag stays.
        assert_eq!(reg.get("a").unwrap().width, 220);
    }
}
