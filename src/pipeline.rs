//! The derived filter → sort pipeline and its cache.
//!
//! Owns the fetched row snapshot, the rule lists, the search text, and the
//! pagination cursor. The filtered+sorted row set is memoized and keyed by
//! explicit version counters (one per input) rather than ambient reactive
//! tracking; any rule/search mutation resets the page to 0.

use log::debug;

use crate::error::{GridError, Result};
use crate::types::{FilterRule, PageState, Pagination, Row, SortDirection, SortRule};
use crate::{filter, paginate, sort};

/// Filter/sort/pagination state over the fetched row snapshot.
#[derive(Debug, Default)]
pub struct DataPipeline {
    rows: Vec<Row>,
    filter_rules: Vec<FilterRule>,
    sort_rules: Vec<SortRule>,
    search: String,
    /// Column keys the free-text search stringifies.
    search_keys: Vec<String>,
    page: PageState,

    data_version: u64,
    filter_version: u64,
    sort_version: u64,
    cache_key: (u64, u64, u64),
    /// Memoized filtered+sorted positions into `rows`.
    cache: Vec<usize>,
}

impl DataPipeline {
    /// Empty pipeline searching over the given column keys.
    pub fn new(search_keys: Vec<String>) -> Self {
        Self {
            search_keys,
            ..Self::default()
        }
    }

    // ---- row snapshot ----

    /// Replace the snapshot wholesale (the one-shot fetch; no incremental
    /// merge).
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        debug!("row snapshot replaced: {} rows", rows.len());
        self.rows = rows;
        self.data_version += 1;
    }

    /// The unfiltered snapshot.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    // ---- filter rules ----

    pub fn filter_rules(&self) -> &[FilterRule] {
        &self.filter_rules
    }

    /// Append a rule (typically [`FilterRule::blank`], filled in by later
    /// updates). Returns its index.
    pub fn add_filter_rule(&mut self, rule: FilterRule) -> usize {
        self.filter_rules.push(rule);
        self.filters_changed();
        self.filter_rules.len() - 1
    }

    /// Replace the rule at `index`.
    pub fn update_filter_rule(&mut self, index: usize, rule: FilterRule) -> Result<()> {
        let slot = self
            .filter_rules
            .get_mut(index)
            .ok_or_else(|| GridError::Other(format!("filter rule index {index} out of range")))?;
        *slot = rule;
        self.filters_changed();
        Ok(())
    }

    /// Remove the rule at `index`.
    pub fn remove_filter_rule(&mut self, index: usize) -> Result<()> {
        if index >= self.filter_rules.len() {
            return Err(GridError::Other(format!(
                "filter rule index {index} out of range"
            )));
        }
        self.filter_rules.remove(index);
        self.filters_changed();
        Ok(())
    }

    pub fn clear_filter_rules(&mut self) {
        if !self.filter_rules.is_empty() {
            self.filter_rules.clear();
            self.filters_changed();
        }
    }

    // ---- search ----

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.search != text {
            self.search = text;
            self.filters_changed();
        }
    }

    // ---- sort rules ----

    pub fn sort_rules(&self) -> &[SortRule] {
        &self.sort_rules
    }

    pub fn add_sort_rule(&mut self, rule: SortRule) -> usize {
        self.sort_rules.push(rule);
        self.sorts_changed();
        self.sort_rules.len() - 1
    }

    pub fn update_sort_rule(&mut self, index: usize, rule: SortRule) -> Result<()> {
        let slot = self
            .sort_rules
            .get_mut(index)
            .ok_or_else(|| GridError::Other(format!("sort rule index {index} out of range")))?;
        *slot = rule;
        self.sorts_changed();
        Ok(())
    }

    pub fn remove_sort_rule(&mut self, index: usize) -> Result<()> {
        if index >= self.sort_rules.len() {
            return Err(GridError::Other(format!(
                "sort rule index {index} out of range"
            )));
        }
        self.sort_rules.remove(index);
        self.sorts_changed();
        Ok(())
    }

    pub fn clear_sort_rules(&mut self) {
        if !self.sort_rules.is_empty() {
            self.sort_rules.clear();
            self.sorts_changed();
        }
    }

    /// Header-click sorting: first click sorts a column ascending, a second
    /// click flips it. Other columns' rules are kept (multi-key).
    pub fn toggle_sort(&mut self, column: &str) {
        if let Some(rule) = self.sort_rules.iter_mut().find(|r| r.column == column) {
            rule.direction = rule.direction.toggled();
        } else {
            self.sort_rules
                .push(SortRule::new(column, SortDirection::Asc));
        }
        self.sorts_changed();
    }

    // ---- pagination ----

    pub fn page_state(&self) -> PageState {
        self.page
    }

    /// Move the cursor. Out-of-range values are stored as-is and clamped
    /// when the page is read.
    pub fn set_page(&mut self, page: usize) {
        self.page.page = page;
    }

    /// Switch page size (validated against the fixed choice set); resets the
    /// page to 0 on success.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        self.page.set_page_size(size)
    }

    // ---- derived output ----

    /// The filtered+sorted row set.
    pub fn derived_rows(&mut self) -> Vec<&Row> {
        self.ensure_cache();
        self.cache
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .collect()
    }

    /// Number of rows surviving the filter.
    pub fn derived_len(&mut self) -> usize {
        self.ensure_cache();
        self.cache.len()
    }

    /// The current page of the filtered+sorted set. Clamps the stored
    /// cursor so `page * page_size < total_rows` whenever rows exist.
    pub fn page_rows(&mut self) -> Vec<&Row> {
        self.ensure_cache();
        let total = self.cache.len();
        self.clamp_page(total);
        let (start, end) = paginate::page_bounds(total, self.page.page, self.page.page_size);
        self.cache
            .get(start..end)
            .unwrap_or(&[])
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .collect()
    }

    /// Pagination numbers for rendering, after clamping the cursor.
    pub fn pagination(&mut self) -> Pagination {
        self.ensure_cache();
        let total = self.cache.len();
        self.clamp_page(total);
        Pagination {
            page: self.page.page,
            page_size: self.page.page_size,
            total_rows: total,
            total_pages: paginate::total_pages(total, self.page.page_size),
        }
    }

    fn clamp_page(&mut self, total_rows: usize) {
        let last = paginate::total_pages(total_rows, self.page.page_size) - 1;
        if self.page.page > last {
            self.page.page = last;
        }
    }

    fn filters_changed(&mut self) {
        self.filter_version += 1;
        self.page.page = 0;
    }

    fn sorts_changed(&mut self) {
        self.sort_version += 1;
        self.page.page = 0;
    }

    fn ensure_cache(&mut self) {
        let key = (self.data_version, self.filter_version, self.sort_version);
        if self.cache_key == key {
            return;
        }
        let mut indices = filter::matching_indices(
            &self.rows,
            &self.filter_rules,
            &self.search,
            &self.search_keys,
        );
        sort::sort_indices(&self.rows, &mut indices, &self.sort_rules);
        debug!(
            "derived row set rebuilt: {} of {} rows, key {:?}",
            indices.len(),
            self.rows.len(),
            key
        );
        self.cache = indices;
        self.cache_key = key;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::{CellValue, Connective, FilterOperator};

    fn row(n: f64) -> Row {
        [("n".to_string(), CellValue::Number(n))]
            .into_iter()
            .collect()
    }

    fn pipeline(count: usize) -> DataPipeline {
        let mut p = DataPipeline::new(vec!["n".to_string()]);
        #[allow(clippy::cast_precision_loss)]
        p.set_rows((0..count).map(|i| row(i as f64)).collect());
        p
    }

    #[test]
    fn test_derived_applies_filter_then_sort() {
        let mut p = pipeline(10);
        p.add_filter_rule(FilterRule::new(
            "n",
            FilterOperator::Gte,
            "5",
            Connective::And,
        ));
        p.add_sort_rule(SortRule::desc("n"));
        let ns: Vec<String> = p.derived_rows().iter().map(|r| r.get("n").display()).collect();
        assert_eq!(ns, vec!["9", "8", "7", "6", "5"]);
    }

    #[test]
    fn test_rule_mutation_resets_page() {
        let mut p = pipeline(50);
        p.set_page(3);
        p.add_filter_rule(FilterRule::blank());
        assert_eq!(p.page_state().page, 0);

        p.set_page(2);
        p.toggle_sort("n");
        assert_eq!(p.page_state().page, 0);

        p.set_page(1);
        p.set_search("4");
        assert_eq!(p.page_state().page, 0);
    }

    #[test]
    fn test_unchanged_search_keeps_page() {
        let mut p = pipeline(50);
        p.set_search("4");
        p.set_page(2);
        p.set_search("4");
        assert_eq!(p.page_state().page, 2);
    }

    #[test]
    fn test_page_cursor_clamps_to_last_page() {
        let mut p = pipeline(25);
        p.set_page(99);
        let numbers = p.pagination();
        assert_eq!(numbers.total_pages, 3);
        assert_eq!(numbers.page, 2);
        assert_eq!(p.page_rows().len(), 5);
    }

    #[test]
    fn test_toggle_sort_cycles_direction() {
        let mut p = pipeline(3);
        p.toggle_sort("n");
        assert_eq!(p.sort_rules()[0].direction, SortDirection::Asc);
        p.toggle_sort("n");
        assert_eq!(p.sort_rules()[0].direction, SortDirection::Desc);
        assert_eq!(p.sort_rules().len(), 1);
    }

    #[test]
    fn test_rule_index_errors() {
        let mut p = pipeline(3);
        assert!(p.update_filter_rule(0, FilterRule::blank()).is_err());
        assert!(p.remove_sort_rule(5).is_err());
    }

    #[test]
    fn test_snapshot_replace_is_wholesale() {
        let mut p = pipeline(3);
        p.set_rows(vec![row(42.0)]);
        assert_eq!(p.derived_len(), 1);
        assert_eq!(p.rows().len(), 1);
    }
}
