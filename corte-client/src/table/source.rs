//! Row sources

use std::time::Duration;

use async_trait::async_trait;

use crate::CorteClient;
use crate::api::Listing;
use crate::error::ApiError;

/// Where a table gets its rows from.
///
/// The controller never talks HTTP directly; it pulls listings through this
/// seam so tests can feed it canned data.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Fetches one listing for the given query parameters.
    async fn fetch(&self, query: &[(String, String)]) -> Result<Listing, ApiError>;
}

/// A [`RowSource`] backed by one tracker listing endpoint.
pub struct EndpointSource {
    client: CorteClient,
    path: String,
    timeout: Option<Duration>,
}

impl EndpointSource {
    /// Creates a source for the given endpoint path (e.g. `api/estoque`).
    pub fn new(client: CorteClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            timeout: None,
        }
    }

    /// Applies a per-fetch timeout on top of the client default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl RowSource for EndpointSource {
    async fn fetch(&self, query: &[(String, String)]) -> Result<Listing, ApiError> {
        match self.timeout {
            Some(timeout) => self.client.fetch_listing_timeout(&self.path, query, timeout).await,
            None => self.client.fetch_listing(&self.path, query).await,
        }
    }
}
