//! SQL HTTP Routes
//!
//! - `POST /sql/exec`  - run a batch of statements, answer `{"RowsAffected": n}`
//! - `POST /sql/query` - run one statement, answer its rows

use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use crate::observability::{sql_preview, Logger};
use crate::protocol::{Endpoint, Envelope, SqlRequest};

use super::errors::GatewayResult;
use super::state::GatewayState;

const SQL_PREVIEW_CHARS: usize = 120;

/// Create SQL routes
pub fn sql_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route(Endpoint::SqlExec.path(), post(sql_exec_handler))
        .route(Endpoint::SqlQuery.path(), post(sql_query_handler))
        .with_state(state)
}

async fn sql_exec_handler(
    State(state): State<Arc<GatewayState>>,
    body: Bytes,
) -> Json<Envelope<Value>> {
    let result = sql_exec(&state, &body).await;
    state.reply(Endpoint::SqlExec, result, Value::Null)
}

async fn sql_query_handler(
    State(state): State<Arc<GatewayState>>,
    body: Bytes,
) -> Json<Envelope<Value>> {
    let result = sql_query(&state, &body).await;
    state.reply(Endpoint::SqlQuery, result, Value::Null)
}

async fn sql_exec(state: &GatewayState, body: &[u8]) -> GatewayResult<Value> {
    let request: SqlRequest = state.decode(body)?;
    let preview = sql_preview(&request.sql, SQL_PREVIEW_CHARS);
    Logger::info("SQL_EXEC", &[("sql", preview.as_str())]);

    state.authorize(&request.auth_key)?;
    state.metrics.increment_sql_exec();

    let sql = request.sql;
    let summary = state.run_store(move |store| store.sql_exec(&sql)).await?;
    Ok(json!(summary))
}

async fn sql_query(state: &GatewayState, body: &[u8]) -> GatewayResult<Value> {
    let request: SqlRequest = state.decode(body)?;
    let preview = sql_preview(&request.sql, SQL_PREVIEW_CHARS);
    Logger::info("SQL_QUERY", &[("sql", preview.as_str())]);

    state.authorize(&request.auth_key)?;
    state.metrics.increment_sql_query();

    let sql = request.sql;
    let rows = state.run_store(move |store| store.sql_query(&sql)).await?;
    Ok(Value::Array(rows.into_iter().map(Value::Object).collect()))
}
