//! The table controller

use std::cmp::Ordering;

use super::Placeholder;
use super::RowSource;
use super::SortIndicator;
use super::SortState;
use super::TableRenderer;
use super::compare_cells;
use crate::api::Pagination;
use crate::model::ColumnSpec;
use crate::model::Row;

/// Custom row filter: does the row match the (lowercased) needle?
pub type Matcher = Box<dyn Fn(&Row, &str) -> bool + Send>;

/// Custom row comparator for one column.
pub type Comparator = Box<dyn Fn(&Row, &Row, &ColumnSpec) -> Ordering + Send>;

/// Load lifecycle of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing fetched yet.
    Empty,
    /// A fetch is in flight.
    Loading,
    /// At least one fetch completed. Failed fetches land here too, with an
    /// error placeholder rendered; there is no persistent error state.
    Loaded,
}

struct TableRow {
    row: Row,
    visible: bool,
    selected: bool,
}

/// One listing screen's table: row cache, filter, sort, selection, and the
/// rendering seam.
///
/// The controller owns the only copy of the fetched rows; visibility and
/// selection are flags it keeps next to each cached row, never derived back
/// from whatever the renderer produced. The cache is replaced wholesale by
/// every successful [`load`](Self::load); mutations go through the backend
/// and a reload.
///
/// A failed load renders a single error placeholder and leaves the cache,
/// the selection and the active filter untouched; the error is logged, not
/// propagated. The next call that touches rendered rows redraws the table
/// from the cache first, so renderer row indices always refer to appended
/// rows. There is no retry and no request cancellation — `load` takes
/// `&mut self`, so one controller cannot race itself.
///
/// # Example
///
/// ```ignore
/// let mut table = TableController::new(
///     Box::new(EndpointSource::new(client, "api/estoque")),
///     vec![ColumnSpec::new("op", "OP"), ColumnSpec::new("peca", "Peça")],
///     Box::new(renderer),
/// );
/// table.load().await;
/// table.filter("1200");
/// table.select_all_visible(true);
/// let ids = table.selected_ids();
/// ```
pub struct TableController {
    source: Box<dyn RowSource>,
    columns: Vec<ColumnSpec>,
    renderer: Box<dyn TableRenderer>,
    cache: Vec<TableRow>,
    sort: SortState,
    needle: String,
    pagination: Option<Pagination>,
    state: LoadState,
    // False while the renderer shows only a placeholder for a non-empty
    // cache (the failed-load render).
    rendered: bool,
    empty_message: String,
    matcher: Option<Matcher>,
    comparator: Option<Comparator>,
}

impl TableController {
    /// Creates a controller over a source, a column list and a renderer.
    pub fn new(
        source: Box<dyn RowSource>,
        columns: Vec<ColumnSpec>,
        renderer: Box<dyn TableRenderer>,
    ) -> Self {
        Self {
            source,
            columns,
            renderer,
            cache: Vec::new(),
            sort: SortState::new(),
            needle: String::new(),
            pagination: None,
            state: LoadState::Empty,
            rendered: false,
            empty_message: "Nenhum registro encontrado".to_string(),
            matcher: None,
            comparator: None,
        }
    }

    /// Sets the placeholder text shown when a load returns no rows.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Replaces the default filter (substring over the displayed cells).
    ///
    /// The needle handed to the matcher is already lowercased.
    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Replaces the default comparator (numeric-first over display text).
    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = Some(comparator);
        self
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetches the source and replaces the cache.
    ///
    /// On success every row starts visible and unselected and the active
    /// filter is reset, mirroring a rebuilt table. On failure the renderer
    /// shows one error placeholder and everything else stays as it was.
    pub async fn load(&mut self) {
        self.load_query(&[]).await;
    }

    /// Fetches the source with query parameters (pagination, server-side
    /// search, date ranges).
    pub async fn load_query(&mut self, query: &[(String, String)]) {
        self.state = LoadState::Loading;

        match self.source.fetch(query).await {
            Ok(listing) => {
                self.pagination = listing.pagination().cloned();
                self.cache = listing
                    .into_rows()
                    .into_iter()
                    .map(|row| TableRow {
                        row,
                        visible: true,
                        selected: false,
                    })
                    .collect();
                self.needle.clear();
                self.state = LoadState::Loaded;
                self.render_all();
            }
            Err(err) => {
                log::warn!("table load failed: {err}");
                // Error folds into Loaded; the next load retries from
                // scratch.
                self.state = LoadState::Loaded;
                self.rendered = false;
                self.renderer.clear();
                self.renderer.placeholder(Placeholder::Error, &err.to_string());
            }
        }
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Applies a case-insensitive substring filter.
    ///
    /// Only visibility flags change; nothing is re-rendered (unless the
    /// renderer still shows a failed-load placeholder, in which case the
    /// cached rows are redrawn first). An empty needle shows every row
    /// again.
    pub fn filter(&mut self, needle: &str) {
        self.ensure_rendered();
        self.needle = needle.to_lowercase();

        for index in 0..self.cache.len() {
            let visible = self.needle.is_empty() || self.row_matches(index);
            if self.cache[index].visible != visible {
                self.cache[index].visible = visible;
                self.renderer.set_visible(index, visible);
            }
        }

        self.renderer.selected_count(self.selected_count());
    }

    fn row_matches(&self, index: usize) -> bool {
        let row = &self.cache[index].row;
        match &self.matcher {
            Some(matcher) => matcher(row, &self.needle),
            None => {
                let haystack: String = self
                    .columns
                    .iter()
                    .map(|column| row.display(column.field()).to_lowercase())
                    .collect();
                haystack.contains(&self.needle)
            }
        }
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Sorts the cache by a column and re-renders.
    ///
    /// The first sort of a column is ascending; repeating it flips the
    /// direction. The indicator moves to this column and clears everywhere
    /// else. Visibility and selection flags travel with their rows.
    pub fn sort(&mut self, column: usize) {
        if self.cache.is_empty() || column >= self.columns.len() {
            return;
        }

        let ascending = self.sort.toggle(column);
        let spec = self.columns[column].clone();

        self.cache.sort_by(|a, b| {
            let ordering = match &self.comparator {
                Some(comparator) => comparator(&a.row, &b.row, &spec),
                None => compare_cells(&a.row.display(spec.field()), &b.row.display(spec.field())),
            };
            if ascending { ordering } else { ordering.reverse() }
        });

        self.renderer
            .sort_indicator(Some(SortIndicator { column, ascending }));
        self.render_all();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Checks or unchecks one row by its render index.
    pub fn select(&mut self, index: usize, selected: bool) {
        self.ensure_rendered();
        if let Some(entry) = self.cache.get_mut(index) {
            entry.selected = selected;
            self.renderer.set_selected(index, selected);
            self.renderer.selected_count(self.selected_count());
        }
    }

    /// Checks or unchecks every row currently passing the filter.
    ///
    /// Rows hidden by the filter are left alone, whichever way the toggle
    /// goes.
    pub fn select_all_visible(&mut self, selected: bool) {
        self.ensure_rendered();
        for index in 0..self.cache.len() {
            if self.cache[index].visible {
                self.cache[index].selected = selected;
                self.renderer.set_selected(index, selected);
            }
        }
        self.renderer.selected_count(self.selected_count());
    }

    /// Returns the ids of rows that are selected AND visible.
    ///
    /// Both conditions matter: a row checked before a filter was applied
    /// must not leak into a bulk action while it is hidden. Rows without an
    /// `id` field are skipped.
    pub fn selected_ids(&self) -> Vec<String> {
        self.cache
            .iter()
            .filter(|entry| entry.selected && entry.visible)
            .filter_map(|entry| entry.row.id())
            .collect()
    }

    /// Number of rows selected and visible.
    pub fn selected_count(&self) -> usize {
        self.cache
            .iter()
            .filter(|entry| entry.selected && entry.visible)
            .count()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the load lifecycle state.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Returns the number of cached rows.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Number of rows passing the active filter.
    pub fn visible_count(&self) -> usize {
        self.cache.iter().filter(|entry| entry.visible).count()
    }

    /// Iterates over all cached rows in render order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.cache.iter().map(|entry| &entry.row)
    }

    /// Returns the rows currently passing the filter, for export payloads.
    pub fn visible_rows(&self) -> Vec<&Row> {
        self.cache
            .iter()
            .filter(|entry| entry.visible)
            .map(|entry| &entry.row)
            .collect()
    }

    /// Pagination of the last successful load, if the endpoint paginates.
    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Returns the column list.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    // Redraws the cache if the renderer still shows a failed-load
    // placeholder, so row-index calls that follow refer to appended rows.
    fn ensure_rendered(&mut self) {
        if !self.rendered {
            self.render_all();
        }
    }

    fn render_all(&mut self) {
        self.rendered = true;
        self.renderer.clear();

        if self.cache.is_empty() {
            self.renderer.placeholder(Placeholder::Empty, &self.empty_message);
            self.renderer.selected_count(0);
            return;
        }

        for entry in &self.cache {
            self.renderer.append_row(&entry.row, &self.columns);
        }
        for (index, entry) in self.cache.iter().enumerate() {
            if !entry.visible {
                self.renderer.set_visible(index, false);
            }
            if entry.selected {
                self.renderer.set_selected(index, true);
            }
        }
        self.renderer.selected_count(self.selected_count());
    }
}
