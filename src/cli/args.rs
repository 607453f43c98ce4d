//! CLI argument definitions using clap
//!
//! Commands:
//! - sqlgate serve [--config <path>] [--host <host>] [--listen <port>] [--auth-key <key>] [--db <path>]
//! - sqlgate exec  [--url <url>] [--auth-key <key>] [--sql <sql>]
//! - sqlgate query [--url <url>] [--auth-key <key>] [--sql <sql>]
//! - sqlgate kv get|set|delete|scan ...

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::client::DEFAULT_BASE_URL;

/// Environment variable holding the shared key
pub const AUTH_KEY_ENV: &str = "SQLGATE_AUTH_KEY";

/// sqlgate - authenticated HTTP gateway for SQL and key/value access to SQLite
#[derive(Parser, Debug)]
#[command(name = "sqlgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the gateway
    Serve(ServeArgs),

    /// Send a mutating statement to /sql/exec and print the response
    Exec(SqlArgs),

    /// Send a read statement to /sql/query and print the response
    Query(SqlArgs),

    /// Key/value operations
    Kv {
        #[command(subcommand)]
        action: KvAction,
    },
}

/// Options for `serve`. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long = "listen")]
    pub port: Option<u16>,

    /// Shared key requests must carry
    #[arg(long, env = AUTH_KEY_ENV)]
    pub auth_key: Option<String>,

    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,
}

/// Where and how to reach a running gateway
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Gateway base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Shared key sent with every request
    #[arg(long, env = AUTH_KEY_ENV, default_value = "auth")]
    pub auth_key: String,

    /// Per-request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct SqlArgs {
    #[command(flatten)]
    pub conn: ConnectionArgs,

    /// Statement text; read from stdin when omitted
    #[arg(long)]
    pub sql: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum KvAction {
    /// Read one key
    Get {
        key: String,
        #[command(flatten)]
        conn: ConnectionArgs,
    },

    /// Write one key
    Set {
        key: String,
        value: String,
        #[command(flatten)]
        conn: ConnectionArgs,
    },

    /// Remove one key
    Delete {
        key: String,
        #[command(flatten)]
        conn: ConnectionArgs,
    },

    /// List keys starting with a prefix
    Scan {
        prefix: String,
        /// Maximum entries; negative means unbounded (gateway default: 10)
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        #[command(flatten)]
        conn: ConnectionArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
