//! The grid view controller.
//!
//! Owns the column registry, the derived data pipeline, the resize state
//! machine, the interaction chrome state, and the container width, and
//! enforces the rules that span components: feasibility before pinning, no
//! layout mutations during an active width drag, lock release on every drag
//! exit path, and layout cache invalidation keyed by (registry version,
//! container width).

use log::{debug, warn};

use crate::error::Result;
use crate::export::{self, ExportTable};
use crate::interaction::{GridEvent, UiState};
use crate::layout::{self, GridLayout, DEFAULT_CONTAINER_WIDTH};
use crate::pipeline::DataPipeline;
use crate::registry::ColumnRegistry;
use crate::resize::ResizeController;
use crate::source::{FetchState, FieldMap, RowSource};
use crate::types::{
    ColumnSpec, FilterRule, PageState, Pagination, PinSide, Row, SortRule,
};

/// Top-level engine state for one grid.
#[derive(Debug)]
pub struct GridView {
    registry: ColumnRegistry,
    pipeline: DataPipeline,
    resize: ResizeController,
    ui: UiState,
    fetch: FetchState,
    container_width: u32,

    layout_key: (u64, u32),
    layout: GridLayout,
}

impl GridView {
    /// Create the view from the static column schema. Row data arrives
    /// separately through [`load_from`](Self::load_from) or
    /// [`load_rows`](Self::load_rows).
    pub fn new(specs: &[ColumnSpec]) -> Result<Self> {
        let registry = ColumnRegistry::new(specs)?;
        let pipeline = DataPipeline::new(registry.keys());
        let container_width = DEFAULT_CONTAINER_WIDTH;
        let layout = GridLayout::compute(&registry, container_width);
        let layout_key = (registry.version(), container_width);
        Ok(Self {
            registry,
            pipeline,
            resize: ResizeController::new(),
            ui: UiState::new(),
            fetch: FetchState::Pending,
            container_width,
            layout_key,
            layout,
        })
    }

    // ---- row data ----

    /// The one-shot fetch. Failure is recorded for inline display and the
    /// body stays empty; no retry is ever issued.
    pub fn load_from(&mut self, source: &mut dyn RowSource, map: &FieldMap) {
        let rows = source.fetch().and_then(|records| map.apply_all(&records));
        match rows {
            Ok(rows) => self.load_rows(rows),
            Err(e) => {
                warn!("row fetch failed: {e}");
                self.fetch = FetchState::Failed(e.to_string());
            }
        }
    }

    /// Install an already-converted snapshot, replacing any prior one.
    pub fn load_rows(&mut self, rows: Vec<Row>) {
        self.pipeline.set_rows(rows);
        self.fetch = FetchState::Loaded;
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    /// The unfiltered snapshot.
    pub fn rows(&self) -> &[Row] {
        self.pipeline.rows()
    }

    // ---- external events ----

    /// Feed one abstract host event into the engine.
    pub fn handle_event(&mut self, event: GridEvent) {
        match event {
            GridEvent::ContainerResized(width) => {
                debug!("container width: {} -> {width}", self.container_width);
                self.container_width = width;
            }
            GridEvent::Dismiss => self.ui.dismiss(),
        }
    }

    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    // ---- layout ----

    /// The computed column layout, memoized by (registry version, container
    /// width).
    pub fn layout(&mut self) -> &GridLayout {
        let key = (self.registry.version(), self.container_width);
        if self.layout_key != key {
            self.layout = GridLayout::compute(&self.registry, self.container_width);
            self.layout_key = key;
        }
        &self.layout
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Whether the pin control for `key` should be enabled: feasible in the
    /// current container and no drag in progress.
    pub fn can_pin(&self, key: &str) -> bool {
        self.resize.is_idle() && layout::pin_feasible(&self.registry, self.container_width, key)
    }

    /// Pin a column. `Ok(false)` means the control was disabled (drag in
    /// progress) or the pin was infeasible; never a fault. Pinning
    /// [`PinSide::None`] unpins.
    pub fn pin_column(&mut self, key: &str, side: PinSide) -> Result<bool> {
        if side == PinSide::None {
            return self.unpin_column(key);
        }
        if !self.resize.is_idle() {
            return Ok(false);
        }
        if !layout::pin_feasible(&self.registry, self.container_width, key) {
            warn!("pin rejected for {key}: would leave too little scrollable width");
            return Ok(false);
        }
        self.registry.set_pin(key, side)?;
        Ok(true)
    }

    /// Unpin a column; its offset clears and it rejoins the unpinned
    /// stacking tier on the next layout read.
    pub fn unpin_column(&mut self, key: &str) -> Result<bool> {
        if !self.resize.is_idle() {
            return Ok(false);
        }
        self.registry.set_pin(key, PinSide::None)?;
        Ok(true)
    }

    /// Show or hide a column.
    pub fn set_column_visible(&mut self, key: &str, visible: bool) -> Result<bool> {
        if !self.resize.is_idle() {
            return Ok(false);
        }
        self.registry.set_visible(key, visible)?;
        Ok(true)
    }

    /// Restore every column to spec defaults.
    pub fn reset_columns(&mut self) -> bool {
        if !self.resize.is_idle() {
            return false;
        }
        self.registry.reset();
        true
    }

    // ---- resize lifecycle ----

    /// Pointer-down on a column edge handle. Acquires the global input lock
    /// on success.
    pub fn begin_resize(&mut self, key: &str, pointer_x: i64) -> bool {
        let started = self.resize.begin(&self.registry, key, pointer_x);
        if started {
            self.ui.input_locked = true;
        }
        started
    }

    /// Pointer-move during a drag; returns the clamped width written.
    pub fn update_resize(&mut self, pointer_x: i64) -> Option<u32> {
        self.resize.update(&mut self.registry, pointer_x)
    }

    /// Pointer-up: commit the drag and release the input lock.
    pub fn end_resize(&mut self) {
        self.resize.finish();
        self.ui.input_locked = false;
    }

    /// Abnormal drag termination (pointer capture lost). The lock is
    /// released here too.
    pub fn abort_resize(&mut self) {
        self.resize.abort();
        self.ui.input_locked = false;
    }

    pub fn is_resizing(&self) -> bool {
        !self.resize.is_idle()
    }

    // ---- filter rules ----

    pub fn filter_rules(&self) -> &[FilterRule] {
        self.pipeline.filter_rules()
    }

    pub fn add_filter_rule(&mut self, rule: FilterRule) -> usize {
        self.pipeline.add_filter_rule(rule)
    }

    pub fn update_filter_rule(&mut self, index: usize, rule: FilterRule) -> Result<()> {
        self.pipeline.update_filter_rule(index, rule)
    }

    pub fn remove_filter_rule(&mut self, index: usize) -> Result<()> {
        self.pipeline.remove_filter_rule(index)
    }

    pub fn clear_filter_rules(&mut self) {
        self.pipeline.clear_filter_rules();
    }

    // ---- search ----

    pub fn search_text(&self) -> &str {
        self.pipeline.search()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.pipeline.set_search(text);
    }

    /// Show or hide the search box. Hiding clears the search text so hidden
    /// state stays inert.
    pub fn set_search_visible(&mut self, visible: bool) {
        self.ui.search_visible = visible;
        if !visible {
            self.pipeline.set_search("");
        }
    }

    // ---- sort rules ----

    pub fn sort_rules(&self) -> &[SortRule] {
        self.pipeline.sort_rules()
    }

    pub fn add_sort_rule(&mut self, rule: SortRule) -> usize {
        self.pipeline.add_sort_rule(rule)
    }

    pub fn update_sort_rule(&mut self, index: usize, rule: SortRule) -> Result<()> {
        self.pipeline.update_sort_rule(index, rule)
    }

    pub fn remove_sort_rule(&mut self, index: usize) -> Result<()> {
        self.pipeline.remove_sort_rule(index)
    }

    pub fn clear_sort_rules(&mut self) {
        self.pipeline.clear_sort_rules();
    }

    /// Header-click sort cycling.
    pub fn toggle_sort(&mut self, column: &str) {
        self.pipeline.toggle_sort(column);
    }

    // ---- pagination ----

    pub fn page_state(&self) -> PageState {
        self.pipeline.page_state()
    }

    pub fn set_page(&mut self, page: usize) {
        self.pipeline.set_page(page);
    }

    /// Switch page size (must be one of the fixed choices); resets to the
    /// first page.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        self.pipeline.set_page_size(size)
    }

    /// Pagination numbers for rendering.
    pub fn pagination(&mut self) -> Pagination {
        self.pipeline.pagination()
    }

    /// The current page of filtered+sorted rows.
    pub fn page_rows(&mut self) -> Vec<&Row> {
        self.pipeline.page_rows()
    }

    // ---- interaction chrome ----

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Toggle a menu/popover. Disabled while a drag holds the input lock.
    pub fn toggle_menu(&mut self, key: &str) {
        if !self.ui.input_locked {
            self.ui.toggle_menu(key);
        }
    }

    // ---- export ----

    /// Project the full filtered+sorted result set over the currently
    /// visible, currently ordered columns.
    pub fn export_table(&mut self) -> ExportTable {
        let rows = self.pipeline.derived_rows();
        let columns = self.registry.ordered_visible();
        export::project(&rows, &columns)
    }
}
