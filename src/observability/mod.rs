//! Observability for sqlgate
//!
//! - Structured logging (JSON lines)
//! - Request counters
//!
//! ```ignore
//! use sqlgate::observability::{Logger, MetricsRegistry};
//!
//! Logger::info("SQL_EXEC", &[("rows_affected", "1")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_sql_exec();
//! ```

mod logger;
mod metrics;

pub use logger::{sql_preview, Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
