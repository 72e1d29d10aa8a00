//! Dynamic table row

use std::borrow::Cow;
use std::collections::HashMap;

use super::CellValue;
use crate::error::FieldError;

/// One unit of tabular data returned by the tracker backend.
///
/// Rows hold field values as a `HashMap<String, CellValue>`, allowing any
/// listing endpoint to share the same type. Typed getter methods provide
/// safe access with proper error handling; rows are treated as immutable
/// once fetched (edits go through the backend and a refetch).
///
/// # Example
///
/// ```
/// use corte_client::model::Row;
///
/// let row = Row::new()
///     .set("peca", "CH 1200x800")
///     .set("quantidade", 4i64);
///
/// assert_eq!(row.get_text("peca").unwrap(), Some("CH 1200x800"));
/// assert_eq!(row.display("rack"), "-");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub(crate) fields: HashMap<String, CellValue>,
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Returns the row identifier, if the backend assigned one.
    ///
    /// Identity is carried by an `id` field; not every listing provides it.
    /// Integer and string ids are both normalized to their text form.
    pub fn id(&self) -> Option<String> {
        match self.fields.get("id") {
            Some(CellValue::Int(n)) => Some(n.to_string()),
            Some(CellValue::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, CellValue> {
        &self.fields
    }

    /// Returns the display text for a field.
    ///
    /// Missing and null fields both render as `-`, matching the tracker
    /// screens.
    pub fn display(&self, field: &str) -> Cow<'_, str> {
        match self.fields.get(field) {
            Some(value) => value.display(),
            None => Cow::Borrowed("-"),
        }
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(field.into(), value.into());
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if the field is missing or has the wrong type.
    // Return Ok(None) only if the field exists and is CellValue::Null.
    // =========================================================================

    /// Gets a text field value.
    pub fn get_text(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(CellValue::Null) => Ok(None),
            Some(CellValue::Text(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::wrong_type(field, "text", other.type_name())),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(CellValue::Null) => Ok(None),
            Some(CellValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::wrong_type(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(CellValue::Null) => Ok(None),
            Some(CellValue::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::wrong_type(field, "int", other.type_name())),
        }
    }

    /// Gets a float field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(CellValue::Null) => Ok(None),
            Some(CellValue::Float(n)) => Ok(Some(*n)),
            Some(CellValue::Int(n)) => Ok(Some(*n as f64)), // Allow widening
            Some(other) => Err(FieldError::wrong_type(field, "float", other.type_name())),
        }
    }
}
