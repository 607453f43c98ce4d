//! # sqlgate HTTP Server Module
//!
//! An authenticated HTTP gateway in front of SQLite.
//!
//! # Endpoints
//!
//! - `POST /sql/exec`, `POST /sql/query` - raw SQL
//! - `POST /kv/get`, `/kv/set`, `/kv/delete`, `/kv/scan` - key/value table
//! - `GET /health`, `GET /metrics` - observability
//!
//! Every POST answers HTTP 200 with `{"v": ..., "e": ...}`.

pub mod config;
pub mod errors;
pub mod kv_routes;
pub mod observability_routes;
pub mod server;
pub mod sql_routes;
pub mod state;

pub use config::{ConfigError, GatewayConfig};
pub use errors::{GatewayError, GatewayResult};
pub use server::{gateway_router, HttpServer};
pub use state::GatewayState;
