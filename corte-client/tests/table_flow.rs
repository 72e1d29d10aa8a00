//! End-to-end behavior of the table controller against a canned source.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Mutex;

use async_trait::async_trait;
use corte_client::api::Listing;
use corte_client::error::ApiError;
use corte_client::model::ColumnSpec;
use corte_client::model::Row;
use corte_client::table::LoadState;
use corte_client::table::Placeholder;
use corte_client::table::RowSource;
use corte_client::table::SortIndicator;
use corte_client::table::TableController;
use corte_client::table::TableRenderer;

/// Serves a scripted sequence of listing results.
struct StubSource {
    responses: Mutex<VecDeque<Result<Listing, ApiError>>>,
}

impl StubSource {
    fn new(responses: Vec<Result<Listing, ApiError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl RowSource for StubSource {
    async fn fetch(&self, _query: &[(String, String)]) -> Result<Listing, ApiError> {
        self.responses
            .lock()
            .expect("poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(Listing::new(Vec::new())))
    }
}

#[derive(Default)]
struct RenderLog {
    rows: Vec<String>,
    visible: Vec<bool>,
    selected: Vec<bool>,
    placeholder: Option<(Placeholder, String)>,
    indicator: Option<SortIndicator>,
    selected_count: usize,
}

#[derive(Clone, Default)]
struct RecordingRenderer {
    log: Rc<RefCell<RenderLog>>,
}

impl TableRenderer for RecordingRenderer {
    fn clear(&mut self) {
        let mut log = self.log.borrow_mut();
        log.rows.clear();
        log.visible.clear();
        log.selected.clear();
        log.placeholder = None;
    }

    fn append_row(&mut self, row: &Row, columns: &[ColumnSpec]) {
        let mut log = self.log.borrow_mut();
        let text = columns
            .iter()
            .map(|c| row.display(c.field()).into_owned())
            .collect::<Vec<_>>()
            .join("|");
        log.rows.push(text);
        log.visible.push(true);
        log.selected.push(false);
    }

    fn placeholder(&mut self, kind: Placeholder, message: &str) {
        self.log.borrow_mut().placeholder = Some((kind, message.to_string()));
    }

    fn set_visible(&mut self, index: usize, visible: bool) {
        self.log.borrow_mut().visible[index] = visible;
    }

    fn set_selected(&mut self, index: usize, selected: bool) {
        self.log.borrow_mut().selected[index] = selected;
    }

    fn sort_indicator(&mut self, indicator: Option<SortIndicator>) {
        self.log.borrow_mut().indicator = indicator;
    }

    fn selected_count(&mut self, count: usize) {
        self.log.borrow_mut().selected_count = count;
    }
}

fn part(id: i64, peca: &str, espessura: &str) -> Row {
    Row::new().set("id", id).set("peca", peca).set("espessura", espessura)
}

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("peca", "Peça"),
        ColumnSpec::new("espessura", "Espessura"),
    ]
}

fn controller(
    responses: Vec<Result<Listing, ApiError>>,
) -> (TableController, Rc<RefCell<RenderLog>>) {
    let renderer = RecordingRenderer::default();
    let log = renderer.log.clone();
    let controller = TableController::new(
        Box::new(StubSource::new(responses)),
        columns(),
        Box::new(renderer),
    )
    .with_empty_message("Nenhum item no estoque");
    (controller, log)
}

#[tokio::test]
async fn load_renders_rows_in_server_order_then_empty_placeholder() {
    let (mut table, log) = controller(vec![
        Ok(Listing::new(vec![part(1, "A", "10"), part(2, "B", "9")])),
        Ok(Listing::new(Vec::new())),
    ]);

    assert_eq!(table.state(), LoadState::Empty);
    table.load().await;

    assert_eq!(table.state(), LoadState::Loaded);
    assert_eq!(log.borrow().rows, vec!["A|10", "B|9"]);
    assert!(log.borrow().placeholder.is_none());

    table.load().await;
    assert!(table.is_empty());
    assert_eq!(
        log.borrow().placeholder,
        Some((Placeholder::Empty, "Nenhum item no estoque".to_string()))
    );
    assert!(log.borrow().rows.is_empty());
}

#[tokio::test]
async fn failed_load_keeps_cache_and_selection() {
    let (mut table, log) = controller(vec![
        Ok(Listing::new(vec![part(1, "A", "10"), part(2, "B", "9")])),
        Err(ApiError::http(500, "internal server error")),
    ]);

    table.load().await;
    table.select(0, true);
    assert_eq!(table.selected_ids(), vec!["1"]);

    table.load().await;

    // The render shows one error placeholder, but nothing else moved.
    let (kind, message) = log.borrow().placeholder.clone().expect("placeholder");
    assert_eq!(kind, Placeholder::Error);
    assert!(message.contains("500"));
    assert_eq!(table.len(), 2);
    assert_eq!(table.selected_ids(), vec!["1"]);
    assert_eq!(table.state(), LoadState::Loaded);
}

#[tokio::test]
async fn filter_after_failed_load_redraws_cached_rows() {
    let (mut table, log) = controller(vec![
        Ok(Listing::new(vec![part(1, "chapa 1200", "10"), part(2, "perfil U", "9")])),
        Err(ApiError::http(500, "internal server error")),
    ]);

    table.load().await;
    table.select(0, true);
    table.load().await;

    // The failed load left only the placeholder behind.
    assert!(log.borrow().rows.is_empty());

    // Filtering must not address rows the renderer no longer has: the
    // cache is redrawn first, selection included, then visibility applies.
    table.filter("chapa");
    assert_eq!(log.borrow().rows, vec!["chapa 1200|10", "perfil U|9"]);
    assert_eq!(log.borrow().visible, vec![true, false]);
    assert_eq!(log.borrow().selected, vec![true, false]);
    assert!(log.borrow().placeholder.is_none());
}

#[tokio::test]
async fn first_load_failure_still_counts_as_loaded() {
    let (mut table, log) = controller(vec![Err(ApiError::http(500, "internal server error"))]);

    table.load().await;

    // Error folds into Loaded; no distinct error state persists and the
    // next load retries from scratch.
    assert_eq!(table.state(), LoadState::Loaded);
    assert!(table.is_empty());
    let (kind, _) = log.borrow().placeholder.clone().expect("placeholder");
    assert_eq!(kind, Placeholder::Error);

    table.load().await;
    assert_eq!(table.state(), LoadState::Loaded);
}

#[tokio::test]
async fn sort_toggles_direction_and_repeats_cleanly() {
    let (mut table, log) = controller(vec![Ok(Listing::new(vec![
        part(1, "B", "2"),
        part(2, "C", "3"),
        part(3, "A", "1"),
    ]))]);
    table.load().await;

    table.sort(0);
    let ascending = log.borrow().rows.clone();
    assert_eq!(ascending, vec!["A|1", "B|2", "C|3"]);
    assert_eq!(
        log.borrow().indicator,
        Some(SortIndicator {
            column: 0,
            ascending: true
        })
    );

    table.sort(0);
    assert_eq!(log.borrow().rows, vec!["C|3", "B|2", "A|1"]);

    // A third toggle lands back on the single-ascending-sort order.
    table.sort(0);
    assert_eq!(log.borrow().rows, ascending);
}

#[tokio::test]
async fn sort_groups_numbers_before_text_fallback() {
    let (mut table, log) = controller(vec![Ok(Listing::new(vec![
        part(1, "x", "10"),
        part(2, "y", "9"),
        part(3, "z", "abc"),
    ]))]);
    table.load().await;

    table.sort(1);
    assert_eq!(log.borrow().rows, vec!["y|9", "x|10", "z|abc"]);
}

#[tokio::test]
async fn filter_hides_and_restores_without_rerender() {
    let (mut table, log) = controller(vec![Ok(Listing::new(vec![
        part(1, "chapa 1200", "10"),
        part(2, "perfil U", "9"),
    ]))]);
    table.load().await;

    table.filter("xyz");
    assert_eq!(table.visible_count(), 0);
    assert_eq!(log.borrow().visible, vec![false, false]);
    // Rows were not re-rendered, only hidden.
    assert_eq!(log.borrow().rows.len(), 2);

    table.filter("");
    assert_eq!(table.visible_count(), 2);
    assert_eq!(log.borrow().visible, vec![true, true]);

    table.filter("CHAPA");
    assert_eq!(table.visible_count(), 1);
    assert_eq!(log.borrow().visible, vec![true, false]);
}

#[tokio::test]
async fn select_all_only_touches_visible_rows() {
    let (mut table, _log) = controller(vec![Ok(Listing::new(vec![
        part(1, "abc-100", "1"),
        part(2, "abc-200", "2"),
        part(3, "def-300", "3"),
    ]))]);
    table.load().await;

    // A row checked before the filter must not leak into the bulk set
    // while hidden.
    table.select(2, true);
    table.filter("abc");
    table.select_all_visible(true);

    let mut ids = table.selected_ids();
    ids.sort();
    assert_eq!(ids, vec!["1", "2"]);

    // Clearing the filter brings the earlier selection back into view.
    table.filter("");
    let mut ids = table.selected_ids();
    ids.sort();
    assert_eq!(ids, vec!["1", "2", "3"]);

    // Unchecking through the select-all toggle also respects visibility.
    table.filter("abc");
    table.select_all_visible(false);
    table.filter("");
    assert_eq!(table.selected_ids(), vec!["3"]);
}

#[tokio::test]
async fn filter_and_sort_agree_on_row_flags() {
    let (mut table, log) = controller(vec![Ok(Listing::new(vec![
        part(1, "B", "2"),
        part(2, "A", "1"),
        part(3, "ax", "3"),
    ]))]);
    table.load().await;

    table.filter("a");
    assert_eq!(table.visible_count(), 2);

    // Sorting re-renders, and hidden rows stay hidden in the new order.
    table.sort(0);
    assert_eq!(log.borrow().rows, vec!["A|1", "ax|3", "B|2"]);
    assert_eq!(log.borrow().visible, vec![true, true, false]);
    assert_eq!(table.visible_count(), 2);
}

#[tokio::test]
async fn successful_reload_resets_filter_and_selection() {
    let rows = vec![part(1, "A", "1"), part(2, "B", "2")];
    let (mut table, log) = controller(vec![
        Ok(Listing::new(rows.clone())),
        Ok(Listing::new(rows)),
    ]);
    table.load().await;
    table.filter("a");
    table.select_all_visible(true);
    assert_eq!(table.selected_ids(), vec!["1"]);

    table.load().await;
    assert_eq!(table.visible_count(), 2);
    assert!(table.selected_ids().is_empty());
    assert_eq!(log.borrow().selected_count, 0);
}

#[tokio::test]
async fn out_of_range_sort_is_ignored() {
    let (mut table, log) = controller(vec![Ok(Listing::new(vec![part(1, "B", "2"), part(2, "A", "1")]))]);
    table.load().await;

    table.sort(5);
    assert_eq!(log.borrow().rows, vec!["B|2", "A|1"]);
    assert!(log.borrow().indicator.is_none());
}
