//! Main CorteClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::error::ApiError;

/// The client for the Corte tracker REST backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely. All listing and mutation endpoints are methods on
/// it; see the [`api`](crate::api) module.
///
/// # Example
///
/// ```ignore
/// use corte_client::CorteClient;
///
/// let client = CorteClient::builder()
///     .url("http://tracker.local:5000")
///     .build()?;
///
/// let estoque = client.stock().await?;
/// ```
#[derive(Clone)]
pub struct CorteClient {
    inner: Arc<CorteClientInner>,
}

struct CorteClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl CorteClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> CorteClientBuilder<Missing> {
        CorteClientBuilder::new()
    }

    /// Returns the base URL of the tracker backend.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolves an endpoint path against the base URL.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Issues a GET request and returns the status code with the raw body.
    pub(crate) async fn get_raw(
        &self,
        path: &str,
        query: &[(String, String)],
        timeout: Option<Duration>,
    ) -> Result<(u16, String), ApiError> {
        let url = self.endpoint_url(path)?;
        let mut request = self.inner.http_client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.dispatch(request, timeout.or(self.inner.timeout)).await
    }

    /// Issues a request with a JSON body and returns the status code with
    /// the raw body.
    pub(crate) async fn send_raw<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        timeout: Option<Duration>,
    ) -> Result<(u16, String), ApiError> {
        let url = self.endpoint_url(path)?;
        let mut request = self.inner.http_client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.dispatch(request, timeout.or(self.inner.timeout)).await
    }

    async fn dispatch(
        &self,
        mut request: reqwest::RequestBuilder,
        timeout: Option<Duration>,
    ) -> Result<(u16, String), ApiError> {
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(timeout.unwrap_or_default())
            } else {
                ApiError::from(e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::from)?;
        Ok((status, body))
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`CorteClient`].
///
/// Uses the typestate pattern so the required base URL is enforced at
/// compile time.
///
/// # Example
///
/// ```ignore
/// let client = CorteClient::builder()
///     .url("http://tracker.local:5000")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct CorteClientBuilder<UrlState> {
    url: UrlState,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl CorteClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the tracker backend URL.
    pub fn url(self, url: impl Into<String>) -> CorteClientBuilder<Set<String>> {
        CorteClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for CorteClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> CorteClientBuilder<U> {
    /// Sets the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl CorteClientBuilder<Set<String>> {
    /// Builds the [`CorteClient`].
    ///
    /// Fails with [`ApiError::InvalidUrl`] if the base URL does not parse.
    pub fn build(self) -> Result<CorteClient, ApiError> {
        let mut raw = self.url.0;
        // A trailing slash keeps Url::join from eating the last path segment.
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;

        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().expect("Failed to build HTTP client")
        });

        Ok(CorteClient {
            inner: Arc::new(CorteClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
