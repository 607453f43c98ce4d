//! Client error types

use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL is missing a scheme or host, or is not http(s)
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Connection refused, reset, closed before a response, or timed out
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body is not a response envelope of the expected shape
    #[error("invalid response envelope: {0}")]
    Decode(#[from] serde_json::Error),
}
