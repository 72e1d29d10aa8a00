//! Rendering seam

use crate::model::ColumnSpec;
use crate::model::Row;

/// What a placeholder row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// The fetch succeeded but returned no rows.
    Empty,
    /// The fetch failed; the message carries the error text.
    Error,
}

/// Sort indicator for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortIndicator {
    /// Visual column index.
    pub column: usize,
    /// `true` for ascending.
    pub ascending: bool,
}

/// Where a table draws itself.
///
/// The controller pushes state changes through this trait and never
/// inspects the visual result. Row indices refer to the current render
/// order (the order rows were passed to [`append_row`](Self::append_row)
/// since the last [`clear`](Self::clear)).
///
/// Render of a load is all-or-nothing: the controller always calls `clear`
/// first and then either appends every row or emits a single placeholder.
pub trait TableRenderer {
    /// Discards all rendered rows and placeholders.
    fn clear(&mut self);

    /// Appends one row in render order.
    fn append_row(&mut self, row: &Row, columns: &[ColumnSpec]);

    /// Replaces the body with a single placeholder row spanning all
    /// columns.
    fn placeholder(&mut self, kind: Placeholder, message: &str);

    /// Shows or hides an already-rendered row.
    fn set_visible(&mut self, index: usize, visible: bool);

    /// Checks or unchecks an already-rendered row.
    fn set_selected(&mut self, index: usize, selected: bool);

    /// Updates the column sort indicator; `None` clears every indicator.
    ///
    /// A `Some` value implies the indicators of all other columns are
    /// cleared.
    fn sort_indicator(&mut self, indicator: Option<SortIndicator>) {
        let _ = indicator;
    }

    /// Updates the live "N selected" display.
    fn selected_count(&mut self, count: usize) {
        let _ = count;
    }
}
