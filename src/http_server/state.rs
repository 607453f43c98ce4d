//! Shared gateway state and the request plumbing every handler uses.

use std::sync::Arc;

use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::AuthKey;
use crate::observability::{Logger, MetricsRegistry};
use crate::protocol::{Endpoint, Envelope};
use crate::store::{Store, StoreError, StoreResult};

use super::errors::{GatewayError, GatewayResult};

/// State shared across all gateway handlers
pub struct GatewayState {
    pub store: Arc<Store>,
    pub auth: AuthKey,
    pub metrics: MetricsRegistry,
}

impl GatewayState {
    pub fn new(store: Store, auth: AuthKey) -> Self {
        Self {
            store: Arc::new(store),
            auth,
            metrics: MetricsRegistry::new(),
        }
    }

    /// Decode a request body. The content type is not checked.
    pub(crate) fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> GatewayResult<T> {
        Ok(serde_json::from_slice(body)?)
    }

    pub(crate) fn authorize(&self, presented: &str) -> GatewayResult<()> {
        if self.auth.verify(presented) {
            Ok(())
        } else {
            Err(GatewayError::AuthFailed)
        }
    }

    /// Run a store operation on the blocking pool.
    pub(crate) async fn run_store<T, F>(&self, op: F) -> GatewayResult<T>
    where
        F: FnOnce(&Store) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        match tokio::task::spawn_blocking(move || op(&store)).await {
            Ok(result) => Ok(result?),
            Err(join_err) => Err(StoreError::Worker(join_err.to_string()).into()),
        }
    }

    /// Turn a handler outcome into the response envelope, counting and
    /// logging failures.
    pub(crate) fn reply(
        &self,
        endpoint: Endpoint,
        result: GatewayResult<Value>,
        on_store_error: Value,
    ) -> Json<Envelope<Value>> {
        match result {
            Ok(value) => Json(Envelope::ok(value)),
            Err(err) => {
                let message = err.to_string();
                let fields = [
                    ("endpoint", endpoint.path()),
                    ("error", message.as_str()),
                ];
                match &err {
                    GatewayError::BadRequest(_) => {
                        self.metrics.increment_bad_requests();
                        Logger::warn(err.code(), &fields);
                    }
                    GatewayError::AuthFailed => {
                        self.metrics.increment_auth_failures();
                        Logger::warn(err.code(), &fields);
                    }
                    GatewayError::Store(_) => {
                        self.metrics.increment_store_errors();
                        Logger::error(err.code(), &fields);
                    }
                }
                let value = err.envelope_value(on_store_error);
                Json(Envelope::failure(value, message))
            }
        }
    }
}
