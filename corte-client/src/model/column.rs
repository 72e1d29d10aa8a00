//! Column specifications

/// Maps one visual column of a table to the row field behind it.
///
/// The default comparator and filter operate on the display text of the
/// field a column names, so the column order given to a controller must
/// match the rendered order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    field: String,
    header: String,
}

impl ColumnSpec {
    /// Creates a new column spec.
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
        }
    }

    /// Returns the row field this column displays.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the header label.
    pub fn header(&self) -> &str {
        &self.header
    }
}
