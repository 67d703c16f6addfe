//! Interaction chrome state, reframed as one explicit serializable object.
//!
//! The source of truth for which popover is open, whether the search box is
//! shown, and whether a drag holds the global input lock. One
//! active-interaction slot means "at most one menu open" is checkable
//! instead of being scattered across independent flags.

use serde::{Deserialize, Serialize};

/// External stimuli, abstracted away from any real display surface so the
/// engine's reaction is a pure function of the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// The hosting container's width changed (resize observation).
    ContainerResized(u32),
    /// Click-outside / Escape: close whatever transient chrome is open.
    Dismiss,
}

/// Mutable UI chrome state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    /// Key of the single open menu/popover, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_menu: Option<String>,
    /// Whether the free-text search box is shown.
    pub search_visible: bool,
    /// Held while a width drag is active; blocks other layout mutations.
    pub input_locked: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a menu (closing any other), or close it when already open.
    pub fn toggle_menu(&mut self, key: &str) {
        if self.open_menu.as_deref() == Some(key) {
            self.open_menu = None;
        } else {
            self.open_menu = Some(key.to_string());
        }
    }

    /// True if the named menu is the open one.
    pub fn menu_open(&self, key: &str) -> bool {
        self.open_menu.as_deref() == Some(key)
    }

    /// Dismiss request: close the open menu, keep everything else.
    pub fn dismiss(&mut self) {
        self.open_menu = None;
    }
}
