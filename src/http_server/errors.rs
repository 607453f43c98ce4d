//! # Gateway Errors
//!
//! Every error ends up inside the response envelope; none of them change the
//! HTTP status.

use serde_json::Value;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for request handling
pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Body was not a JSON object of the expected shape
    #[error("{0}")]
    BadRequest(#[from] serde_json::Error),

    /// `auth_key` did not match
    #[error("auth fail")]
    AuthFailed,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GatewayError {
    /// Short code used in log lines
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::BadRequest(_) => "BAD_REQUEST",
            GatewayError::AuthFailed => "AUTH_FAIL",
            GatewayError::Store(_) => "STORE_ERROR",
        }
    }

    /// The `v` an endpoint answers with alongside this error. Requests that
    /// never reached the store answer with `""`.
    pub fn envelope_value(&self, on_store_error: Value) -> Value {
        match self {
            GatewayError::Store(_) => on_store_error,
            _ => Value::String(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_message_is_stable() {
        assert_eq!(GatewayError::AuthFailed.to_string(), "auth fail");
    }

    #[test]
    fn test_envelope_value() {
        assert_eq!(
            GatewayError::AuthFailed.envelope_value(Value::Null),
            Value::String(String::new())
        );
        assert_eq!(
            GatewayError::Store(StoreError::Poisoned).envelope_value(Value::Null),
            Value::Null
        );
    }
}
