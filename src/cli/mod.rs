//! CLI module for sqlgate
//!
//! Provides command-line interface for:
//! - serve: run the gateway
//! - exec / query: one-shot SQL requests
//! - kv: one-shot key/value requests

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ConnectionArgs, KvAction, ServeArgs, SqlArgs};
pub use commands::{exec, kv, query, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_sql, write_body};
