//! Gateway Configuration
//!
//! Bind address, shared key and database location. Loaded from an optional
//! JSON file; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 4243)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared key every request must carry (default: "auth")
    #[serde(default = "default_auth_key")]
    pub auth_key: String,

    /// SQLite database file (default: "./storage.db")
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4243
}

fn default_auth_key() -> String {
    "auth".to_string()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./storage.db")
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth_key: default_auth_key(),
            db_path: default_db_path(),
        }
    }
}

impl GatewayConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: GatewayConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.auth_key.is_empty() {
            return Err(ConfigError::Invalid(
                "auth_key must not be empty".to_string(),
            ));
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("db_path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4243);
        assert_eq!(config.auth_key, "auth");
        assert_eq!(config.db_path, PathBuf::from("./storage.db"));
    }

    #[test]
    fn test_socket_addr() {
        let config = GatewayConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sqlgate.json");
        fs::write(&path, r#"{"port": 9000, "auth_key": "k"}"#).unwrap();

        let config = GatewayConfig::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.auth_key, "k");
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_load_rejects_empty_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sqlgate.json");
        fs::write(&path, r#"{"auth_key": ""}"#).unwrap();

        let err = GatewayConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GatewayConfig::load(Path::new("/nonexistent/sqlgate.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn test_load_bad_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sqlgate.json");
        fs::write(&path, "{port: }").unwrap();

        assert!(matches!(
            GatewayConfig::load(&path).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
