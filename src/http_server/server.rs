//! # HTTP Server
//!
//! Combines the gateway routers and runs them until Ctrl-C.

use std::future::Future;
use std::io;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::auth::AuthKey;
use crate::observability::Logger;
use crate::store::Store;

use super::config::GatewayConfig;
use super::kv_routes::kv_routes;
use super::observability_routes::observability_routes;
use super::sql_routes::sql_routes;
use super::state::GatewayState;

/// HTTP server for the SQL gateway
pub struct HttpServer {
    config: GatewayConfig,
    state: Arc<GatewayState>,
    router: Router,
}

impl HttpServer {
    /// Create a server over an already opened store
    pub fn with_config(config: GatewayConfig, store: Store) -> Self {
        let state = Arc::new(GatewayState::new(
            store,
            AuthKey::new(config.auth_key.clone()),
        ));
        let router = gateway_router(Arc::clone(&state));
        Self {
            config,
            state,
            router,
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    pub fn state(&self) -> Arc<GatewayState> {
        Arc::clone(&self.state)
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn start(self) -> io::Result<()> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `shutdown` resolves; in-flight requests are
    /// allowed to finish.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("http://{}", listener.local_addr()?);
        let db = self
            .state
            .store
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ":memory:".to_string());
        Logger::info("HTTP_LISTENING", &[("addr", addr.as_str()), ("db", db.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        Logger::info("HTTP_STOPPED", &[]);
        Ok(())
    }
}

/// All gateway endpoints on one router
pub fn gateway_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .merge(observability_routes(Arc::clone(&state)))
        .merge(sql_routes(Arc::clone(&state)))
        .merge(kv_routes(state))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        let message = err.to_string();
        Logger::error("SIGNAL_HANDLER_FAILED", &[("error", message.as_str())]);
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
    Logger::info("SHUTDOWN_REQUESTED", &[]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(config: GatewayConfig) -> HttpServer {
        HttpServer::with_config(config, Store::open_in_memory().unwrap())
    }

    #[test]
    fn test_server_creation() {
        let server = server(GatewayConfig::default());
        assert_eq!(server.socket_addr(), "0.0.0.0:4243");
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = server(GatewayConfig::with_port(8080));
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_state_uses_configured_key() {
        let config = GatewayConfig {
            auth_key: "custom".to_string(),
            ..Default::default()
        };
        let state = server(config).state();
        assert!(state.auth.verify("custom"));
        assert!(!state.auth.verify("auth"));
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server = server(GatewayConfig::default());
        server.serve(listener, async {}).await.unwrap();
    }
}
