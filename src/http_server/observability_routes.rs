//! `/health` and `/metrics`
//!
//! Neither endpoint requires the auth key; neither exposes data.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::observability::MetricsSnapshot;

use super::state::GatewayState;

/// Liveness report. `db` is `"ok"` when the store answered a trivial query.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub db: String,
    pub version: &'static str,
}

pub fn observability_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .with_state(state)
}

async fn health(State(state): State<Arc<GatewayState>>) -> Json<Health> {
    let db = match state.run_store(|store| store.ping()).await {
        Ok(()) => "ok".to_string(),
        Err(err) => err.to_string(),
    };
    let status = if db == "ok" { "ok" } else { "degraded" };

    Json(Health {
        status,
        db,
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn metrics(State(state): State<Arc<GatewayState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
