use serde::{Deserialize, Serialize};

/// The fixed set of selectable page sizes.
pub const PAGE_SIZE_CHOICES: [usize; 5] = [10, 25, 50, 100, 1000];

/// Page size in effect before the user picks one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current pagination cursor.
///
/// `page` is 0-based. The engine resets it to 0 whenever filter rules, search
/// text, sort rules, or the page size change; clamping against the total is
/// the view controller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageState {
    /// Switch page size; rejects sizes outside [`PAGE_SIZE_CHOICES`].
    /// A successful switch forces `page = 0`.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !PAGE_SIZE_CHOICES.contains(&size) {
            return false;
        }
        self.page_size = size;
        self.page = 0;
        true
    }
}

/// Pagination numbers consumed by rendering alongside the page slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_must_be_a_choice() {
        let mut state = PageState::default();
        assert!(!state.set_page_size(33));
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert!(state.set_page_size(100));
        assert_eq!(state.page_size, 100);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut state = PageState {
            page: 4,
            page_size: 10,
        };
        assert!(state.set_page_size(25));
        assert_eq!(state.page, 0);
    }
}
