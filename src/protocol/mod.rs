//! Wire contract shared by the gateway and its client.
//!
//! Every request is a JSON object carrying the shared `auth_key`; every
//! response is an envelope `{"v": <value>, "e": "<error or empty>"}` sent with
//! HTTP 200.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Default scan size when a request carries no usable `limit`.
pub const DEFAULT_SCAN_LIMIT: i64 = 10;

/// Gateway endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    SqlExec,
    SqlQuery,
    KvGet,
    KvSet,
    KvDelete,
    KvScan,
}

impl Endpoint {
    /// Request path for the endpoint
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::SqlExec => "/sql/exec",
            Endpoint::SqlQuery => "/sql/query",
            Endpoint::KvGet => "/kv/get",
            Endpoint::KvSet => "/kv/set",
            Endpoint::KvDelete => "/kv/delete",
            Endpoint::KvScan => "/kv/scan",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Body of `/sql/exec` and `/sql/query`.
///
/// Field order is the wire order: `auth_key` first, then `sql`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlRequest {
    #[serde(default)]
    pub auth_key: String,
    #[serde(default)]
    pub sql: String,
}

impl SqlRequest {
    pub fn new(auth_key: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            auth_key: auth_key.into(),
            sql: sql.into(),
        }
    }
}

// Keeps the credential out of `{:?}` output.
impl fmt::Debug for SqlRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlRequest")
            .field("auth_key", &"<redacted>")
            .field("sql", &self.sql)
            .finish()
    }
}

/// Body of the `/kv/*` endpoints. Each endpoint reads only the fields it
/// needs; missing fields are empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvRequest {
    #[serde(default)]
    pub auth_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_limit",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit: Option<String>,
}

impl KvRequest {
    pub fn new(auth_key: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            auth_key: auth_key.into(),
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    /// Scan limit; absent or non-numeric values fall back to
    /// [`DEFAULT_SCAN_LIMIT`].
    pub fn scan_limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_SCAN_LIMIT)
    }
}

impl fmt::Debug for KvRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvRequest")
            .field("auth_key", &"<redacted>")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("limit", &self.limit)
            .finish()
    }
}

/// `limit` travels as a decimal string; plain JSON numbers are accepted too.
fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLimit {
        Text(String),
        Number(serde_json::Number),
    }

    let raw = Option::<RawLimit>::deserialize(deserializer)?;
    Ok(raw.map(|limit| match limit {
        RawLimit::Text(text) => text,
        RawLimit::Number(number) => number.to_string(),
    }))
}

/// Response envelope.
///
/// `e` is empty on success. The server always sends both fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "v")]
    pub value: T,
    #[serde(rename = "e", default)]
    pub error: String,
}

impl<T> Envelope<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            error: String::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_empty()
    }

    /// Convert into a `Result`, treating a non-empty `e` as the error.
    pub fn into_result(self) -> Result<T, String> {
        if self.error.is_empty() {
            Ok(self.value)
        } else {
            Err(self.error)
        }
    }
}

impl Envelope<Value> {
    pub fn failure(value: Value, error: impl Into<String>) -> Self {
        Self {
            value,
            error: error.into(),
        }
    }
}

/// Payload of a successful `/sql/exec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecSummary {
    #[serde(rename = "RowsAffected")]
    pub rows_affected: i64,
}

/// One row of a `/sql/query` result, keyed by column name.
pub type Row = serde_json::Map<String, Value>;
