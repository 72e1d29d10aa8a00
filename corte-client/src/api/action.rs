//! Mutation outcomes

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;

use crate::CorteClient;
use crate::error::ApiError;

/// Result of a mutating call (`POST`/`PUT`/`DELETE`).
///
/// The backend answers every mutation with `success` and `message`; some
/// routes attach extra payload (the created record, a redirect target),
/// which is kept in [`extra`](ActionOutcome::extra).
///
/// Failures of the request itself are reported as `Err(ApiError)` — the
/// original screens sometimes assumed success on a network error, which
/// this client deliberately does not do. A returned outcome with
/// `success == false` is a business-level rejection, not a transport error.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionOutcome {
    success: bool,
    #[serde(default)]
    message: String,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

impl ActionOutcome {
    /// Returns `true` if the backend accepted the mutation.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns an extra payload field, if the route provided one.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

fn decode_action(status: u16, body: &str) -> Result<ActionOutcome, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::http(status, body.trim().to_string()));
    }

    serde_json::from_str(body).map_err(|e| ApiError::parse_with_body(e.to_string(), body.to_string()))
}

impl CorteClient {
    /// Issues a JSON POST and decodes the outcome.
    pub async fn post_action<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ActionOutcome, ApiError> {
        let (status, raw) = self.send_raw(Method::POST, path, Some(body), None).await?;
        decode_action(status, &raw)
    }

    /// Issues a JSON POST with a per-call timeout.
    pub async fn post_action_timeout<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<ActionOutcome, ApiError> {
        let (status, raw) = self
            .send_raw(Method::POST, path, Some(body), Some(timeout))
            .await?;
        decode_action(status, &raw)
    }

    /// Issues a JSON PUT and decodes the outcome.
    pub async fn put_action<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ActionOutcome, ApiError> {
        let (status, raw) = self.send_raw(Method::PUT, path, Some(body), None).await?;
        decode_action(status, &raw)
    }

    /// Issues a bodyless DELETE and decodes the outcome.
    pub async fn delete_action(&self, path: &str) -> Result<ActionOutcome, ApiError> {
        let (status, raw) = self
            .send_raw::<()>(Method::DELETE, path, None, None)
            .await?;
        decode_action(status, &raw)
    }
}
