//! Gateway client.
//!
//! Each call sends exactly one POST and returns the response body as text.
//! There are no retries and no status checks: whatever the gateway answers
//! is handed back untouched. [`decode`] is available for callers that want
//! the typed envelope.
//!
//! ```rust,no_run
//! use sqlgate::client::GatewayClient;
//!
//! # async fn example() -> sqlgate::client::ClientResult<()> {
//! let client = GatewayClient::builder()
//!     .base_url("http://127.0.0.1:4243")
//!     .auth_key("auth")
//!     .build()?;
//!
//! let body = client.query("select * from tasks where task_status = 0;").await?;
//! println!("{}", body);
//! # Ok(())
//! # }
//! ```

mod errors;

pub use errors::{ClientError, ClientResult};

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::protocol::{Endpoint, Envelope, KvRequest, SqlRequest};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://0.0.0.0:4243";

/// HTTP client for the gateway
#[derive(Clone)]
pub struct GatewayClient {
    base_url: String,
    auth_key: String,
    http_client: reqwest::Client,
}

impl GatewayClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> GatewayClientBuilder {
        GatewayClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a mutating statement to `/sql/exec`.
    pub async fn exec(&self, sql: &str) -> ClientResult<String> {
        let request = SqlRequest::new(self.auth_key.as_str(), sql);
        self.post(Endpoint::SqlExec, &request).await
    }

    /// Send a read statement to `/sql/query`.
    pub async fn query(&self, sql: &str) -> ClientResult<String> {
        let request = SqlRequest::new(self.auth_key.as_str(), sql);
        self.post(Endpoint::SqlQuery, &request).await
    }

    pub async fn kv_get(&self, key: &str) -> ClientResult<String> {
        let request = KvRequest::new(self.auth_key.as_str(), key);
        self.post(Endpoint::KvGet, &request).await
    }

    pub async fn kv_set(&self, key: &str, value: &str) -> ClientResult<String> {
        let request = KvRequest::new(self.auth_key.as_str(), key).with_value(value);
        self.post(Endpoint::KvSet, &request).await
    }

    pub async fn kv_delete(&self, key: &str) -> ClientResult<String> {
        let request = KvRequest::new(self.auth_key.as_str(), key);
        self.post(Endpoint::KvDelete, &request).await
    }

    /// Scan keys starting with `prefix`. `None` leaves the limit to the
    /// gateway's default.
    pub async fn kv_scan(&self, prefix: &str, limit: Option<i64>) -> ClientResult<String> {
        let mut request = KvRequest::new(self.auth_key.as_str(), prefix);
        if let Some(limit) = limit {
            request = request.with_limit(limit);
        }
        self.post(Endpoint::KvScan, &request).await
    }

    /// One POST, body returned as text whatever the status.
    async fn post<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> ClientResult<String> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let response = self.http_client.post(&url).json(body).send().await?;
        Ok(response.text().await?)
    }
}

/// Parse a response body into the gateway envelope.
pub fn decode<T: DeserializeOwned>(body: &str) -> ClientResult<Envelope<T>> {
    Ok(serde_json::from_str(body)?)
}

/// Builder for [`GatewayClient`]
#[derive(Debug, Clone)]
pub struct GatewayClientBuilder {
    base_url: String,
    auth_key: String,
    timeout: Option<Duration>,
}

impl GatewayClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_key: String::new(),
            timeout: None,
        }
    }

    /// Gateway root, e.g. `http://127.0.0.1:4243`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn auth_key(mut self, key: impl Into<String>) -> Self {
        self.auth_key = key.into();
        self
    }

    /// Overall per-request timeout. Unset means wait indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client
    pub fn build(self) -> ClientResult<GatewayClient> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut client_builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let http_client = client_builder.build()?;

        Ok(GatewayClient {
            base_url,
            auth_key: self.auth_key,
            http_client,
        })
    }
}

impl Default for GatewayClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_base_url(raw: &str) -> ClientResult<String> {
    let invalid = |reason: &str| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
