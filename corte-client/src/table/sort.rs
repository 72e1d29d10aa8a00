//! Column sort state and the cell comparator

use std::cmp::Ordering;
use std::collections::HashMap;

/// Per-table memory of the last direction applied to each column.
///
/// The first sort of a column is ascending; sorting it again flips the
/// direction. Directions are remembered per column for the table's
/// lifetime, while the visual indicator only ever marks the most recently
/// sorted column.
#[derive(Debug, Clone, Default)]
pub struct SortState {
    directions: HashMap<usize, bool>,
}

impl SortState {
    /// Creates an empty sort state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the direction of a column and returns the new one
    /// (`true` = ascending).
    pub fn toggle(&mut self, column: usize) -> bool {
        let ascending = !self.directions.get(&column).copied().unwrap_or(false);
        self.directions.insert(column, ascending);
        ascending
    }

    /// Returns the last applied direction for a column, if it was ever
    /// sorted.
    pub fn direction(&self, column: usize) -> Option<bool> {
        self.directions.get(&column).copied()
    }
}

/// Parses the longest leading number of a cell text, if any.
///
/// Mirrors how the tracker screens read cell values before comparing:
/// leading whitespace is skipped, an optional sign, digits with at most one
/// decimal point and an optional exponent are consumed, and the rest of the
/// text is ignored. `"12.5mm"` is 12.5; `"abc"` is not a number.
pub fn leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }

    // Exponent only counts if at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > digits_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Compares two cell texts the way every tracker table sorts.
///
/// If both texts carry a leading number the comparison is numeric; a
/// numeric cell sorts before a non-numeric one; two non-numeric cells
/// fall back to case-insensitive string order. The numeric-first rule is
/// a contract: it governs the visible ordering of mixed columns like
/// thickness and quantity.
///
/// Grouping numeric cells strictly before non-numeric ones keeps the
/// comparator a total order, which `sort_by` requires: a plain string
/// fallback for mixed pairs admits cycles like `"9" < "+10" < "+a" < "9"`.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    let a = a.trim();
    let b = b.trim();

    match (leading_number(a), leading_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}
