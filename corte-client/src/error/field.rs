//! FieldError for Row accessors

/// Error type for typed field access on [`Row`](crate::model::Row).
#[derive(Debug, Clone, thiserror::Error)]
pub enum FieldError {
    /// The requested field does not exist in the row.
    #[error("row has no field '{0}'")]
    Missing(String),

    /// The field exists but holds a different type than requested.
    #[error("field '{field}' holds {actual}, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a new missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Creates a new wrong type error.
    pub fn wrong_type(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
            actual,
        }
    }
}
