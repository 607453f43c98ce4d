//! Key/Value HTTP Routes
//!
//! Endpoints over the `kvdata` table. `/kv/get` answers `""` for a missing
//! key; `/kv/scan` answers an object of matching entries.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use crate::observability::Logger;
use crate::protocol::{Endpoint, Envelope, KvRequest};

use super::errors::GatewayResult;
use super::state::GatewayState;

/// Create KV routes
pub fn kv_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route(Endpoint::KvGet.path(), post(kv_get_handler))
        .route(Endpoint::KvSet.path(), post(kv_set_handler))
        .route(Endpoint::KvDelete.path(), post(kv_delete_handler))
        .route(Endpoint::KvScan.path(), post(kv_scan_handler))
        .with_state(state)
}

fn empty() -> Value {
    Value::String(String::new())
}

async fn kv_get_handler(
    State(state): State<Arc<GatewayState>>,
    body: Bytes,
) -> Json<Envelope<Value>> {
    let result = kv_get(&state, &body).await;
    state.reply(Endpoint::KvGet, result, empty())
}

async fn kv_set_handler(
    State(state): State<Arc<GatewayState>>,
    body: Bytes,
) -> Json<Envelope<Value>> {
    let result = kv_set(&state, &body).await;
    state.reply(Endpoint::KvSet, result, empty())
}

async fn kv_delete_handler(
    State(state): State<Arc<GatewayState>>,
    body: Bytes,
) -> Json<Envelope<Value>> {
    let result = kv_delete(&state, &body).await;
    state.reply(Endpoint::KvDelete, result, empty())
}

async fn kv_scan_handler(
    State(state): State<Arc<GatewayState>>,
    body: Bytes,
) -> Json<Envelope<Value>> {
    let result = kv_scan(&state, &body).await;
    state.reply(Endpoint::KvScan, result, Value::Null)
}

async fn kv_get(state: &GatewayState, body: &[u8]) -> GatewayResult<Value> {
    let request: KvRequest = state.decode(body)?;
    Logger::info("KV_GET", &[("key", request.key.as_str())]);
    state.authorize(&request.auth_key)?;
    state.metrics.increment_kv_reads();

    let key = request.key;
    let value = state.run_store(move |store| store.kv_get(&key)).await?;
    Ok(Value::String(value.unwrap_or_default()))
}

async fn kv_set(state: &GatewayState, body: &[u8]) -> GatewayResult<Value> {
    let request: KvRequest = state.decode(body)?;
    Logger::info("KV_SET", &[("key", request.key.as_str())]);
    state.authorize(&request.auth_key)?;
    state.metrics.increment_kv_writes();

    let key = request.key;
    let value = request.value.unwrap_or_default();
    state
        .run_store(move |store| store.kv_set(&key, &value))
        .await?;
    Ok(empty())
}

async fn kv_delete(state: &GatewayState, body: &[u8]) -> GatewayResult<Value> {
    let request: KvRequest = state.decode(body)?;
    Logger::info("KV_DELETE", &[("key", request.key.as_str())]);
    state.authorize(&request.auth_key)?;
    state.metrics.increment_kv_writes();

    let key = request.key;
    state.run_store(move |store| store.kv_delete(&key)).await?;
    Ok(empty())
}

async fn kv_scan(state: &GatewayState, body: &[u8]) -> GatewayResult<Value> {
    let request: KvRequest = state.decode(body)?;
    let limit = request.scan_limit();
    let limit_text = limit.to_string();
    Logger::info(
        "KV_SCAN",
        &[("prefix", request.key.as_str()), ("limit", limit_text.as_str())],
    );
    state.authorize(&request.auth_key)?;
    state.metrics.increment_kv_reads();

    let prefix = request.key;
    let entries = state
        .run_store(move |store| store.kv_scan(&prefix, limit))
        .await?;
    Ok(json!(entries))
}
