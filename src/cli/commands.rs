//! CLI command implementations
//!
//! `serve` boots the gateway. Every other command is a one-shot client: one
//! request, print the body, exit.

use std::time::Duration;

use crate::client::GatewayClient;
use crate::http_server::{GatewayConfig, HttpServer};
use crate::store::Store;

use super::args::{Cli, Command, ConnectionArgs, KvAction, ServeArgs, SqlArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_sql, write_body};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a command on a fresh tokio runtime
pub fn run_command(command: Command) -> CliResult<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(dispatch(command))
}

async fn dispatch(command: Command) -> CliResult<()> {
    match command {
        Command::Serve(args) => serve(args).await,
        Command::Exec(args) => exec(args).await,
        Command::Query(args) => query(args).await,
        Command::Kv { action } => kv(action).await,
    }
}

/// Merge defaults, the optional config file and flags, in that order.
pub fn resolve_config(args: &ServeArgs) -> CliResult<GatewayConfig> {
    let mut config = match &args.config {
        Some(path) => GatewayConfig::load(path)?,
        None => GatewayConfig::default(),
    };

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(auth_key) = &args.auth_key {
        config.auth_key = auth_key.clone();
    }
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Boot the gateway and serve until Ctrl-C
pub async fn serve(args: ServeArgs) -> CliResult<()> {
    let config = resolve_config(&args)?;

    let store = Store::open(&config.db_path).map_err(|e| {
        CliError::boot_failed(format!(
            "Failed to open database {}: {}",
            config.db_path.display(),
            e
        ))
    })?;

    HttpServer::with_config(config, store)
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server error: {}", e)))
}

/// Send one statement to `/sql/exec`
pub async fn exec(args: SqlArgs) -> CliResult<()> {
    let sql = statement(args.sql)?;
    let body = connect(&args.conn)?.exec(&sql).await?;
    write_body(&body)
}

/// Send one statement to `/sql/query`
pub async fn query(args: SqlArgs) -> CliResult<()> {
    let sql = statement(args.sql)?;
    let body = connect(&args.conn)?.query(&sql).await?;
    write_body(&body)
}

/// Run one key/value operation
pub async fn kv(action: KvAction) -> CliResult<()> {
    let body = match action {
        KvAction::Get { key, conn } => connect(&conn)?.kv_get(&key).await?,
        KvAction::Set { key, value, conn } => connect(&conn)?.kv_set(&key, &value).await?,
        KvAction::Delete { key, conn } => connect(&conn)?.kv_delete(&key).await?,
        KvAction::Scan {
            prefix,
            limit,
            conn,
        } => connect(&conn)?.kv_scan(&prefix, limit).await?,
    };
    write_body(&body)
}

fn statement(sql: Option<String>) -> CliResult<String> {
    match sql {
        Some(sql) => Ok(sql),
        None => read_sql(),
    }
}

fn connect(conn: &ConnectionArgs) -> CliResult<GatewayClient> {
    let mut builder = GatewayClient::builder()
        .base_url(conn.url.as_str())
        .auth_key(conn.auth_key.as_str());
    if let Some(secs) = conn.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
