//! Listing responses and the envelope decoder

use serde::Deserialize;

use crate::CorteClient;
use crate::error::ApiError;
use crate::model::Row;

/// Pagination metadata attached to envelope listings (logs, outbound
/// history).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    current_page: u32,
    total_pages: u32,
}

impl Pagination {
    /// Creates pagination metadata.
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    /// Returns the 1-based page this listing covers.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the total number of pages.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Returns `true` if pages exist after the current one.
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// One fetched listing: the rows plus pagination when the endpoint is
/// paginated.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    rows: Vec<Row>,
    pagination: Option<Pagination>,
}

impl Listing {
    /// Creates a listing from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            pagination: None,
        }
    }

    /// Attaches pagination metadata.
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Returns a reference to the rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the listing and returns the rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns pagination metadata, if the endpoint is paginated.
    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Returns `true` if the listing has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    dados: Vec<Row>,
    pagination: Option<Pagination>,
}

/// Decodes a listing response body.
///
/// Accepts both shapes the backend produces: a bare array of rows, or the
/// `dados`/`pagination` envelope. A 2xx object carrying an `error` field is
/// an application error; a non-2xx status is an HTTP error with the body as
/// its message.
pub(crate) fn decode_listing(status: u16, body: &str) -> Result<Listing, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::http(status, body.trim().to_string()));
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ApiError::parse_with_body(e.to_string(), body.to_string()))?;

    match value {
        serde_json::Value::Array(items) => {
            let rows: Vec<Row> = serde_json::from_value(serde_json::Value::Array(items))
                .map_err(|e| ApiError::parse_with_body(e.to_string(), body.to_string()))?;
            Ok(Listing::new(rows))
        }
        serde_json::Value::Object(map) => {
            if let Some(error) = map.get("error") {
                let message = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
                return Err(ApiError::application(message));
            }
            let envelope: Envelope = serde_json::from_value(serde_json::Value::Object(map))
                .map_err(|e| ApiError::parse_with_body(e.to_string(), body.to_string()))?;
            let mut listing = Listing::new(envelope.dados);
            if let Some(pagination) = envelope.pagination {
                listing = listing.with_pagination(pagination);
            }
            Ok(listing)
        }
        other => Err(ApiError::parse(format!(
            "expected array or envelope, got {other}"
        ))),
    }
}

impl CorteClient {
    /// Fetches a listing endpoint.
    pub async fn fetch_listing(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Listing, ApiError> {
        let (status, body) = self.get_raw(path, query, None).await?;
        decode_listing(status, &body)
    }

    /// Fetches a listing endpoint with a per-call timeout.
    pub async fn fetch_listing_timeout(
        &self,
        path: &str,
        query: &[(String, String)],
        timeout: std::time::Duration,
    ) -> Result<Listing, ApiError> {
        let (status, body) = self.get_raw(path, query, Some(timeout)).await?;
        decode_listing(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_array() {
        let listing = decode_listing(200, r#"[{"id":1,"peca":"A"},{"id":2,"peca":"B"}]"#).unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.rows()[0].id().as_deref(), Some("1"));
        assert!(listing.pagination().is_none());
    }

    #[test]
    fn test_decode_envelope() {
        let body = r#"{"dados":[{"usuario":"ana","acao":"login"}],"pagination":{"current_page":2,"total_pages":5}}"#;
        let listing = decode_listing(200, body).unwrap();
        assert_eq!(listing.len(), 1);
        let pagination = listing.pagination().unwrap();
        assert_eq!(pagination.current_page(), 2);
        assert_eq!(pagination.total_pages(), 5);
        assert!(pagination.has_more());
    }

    #[test]
    fn test_decode_error_field() {
        let err = decode_listing(200, r#"{"error":"sem acesso ao banco"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Application { .. }));
        assert_eq!(err.to_string(), "sem acesso ao banco");
    }

    #[test]
    fn test_decode_http_error() {
        let err = decode_listing(500, "internal server error").unwrap_err();
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_decode_garbage_body() {
        let err = decode_listing(200, "<html>proxy error</html>").unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn test_decode_empty_array() {
        let listing = decode_listing(200, "[]").unwrap();
        assert!(listing.is_empty());
    }
}
