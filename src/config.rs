//! Configuration module for mediadeck.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::{MediadeckError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deployment environment label reported by the health endpoint.
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/mediadeck.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded bytes and thumbnails are stored.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Default per-user storage ceiling in bytes (1 GiB).
    #[serde(default = "default_storage_limit")]
    pub default_storage_limit: i64,
}

fn default_upload_dir() -> String {
    "data/uploads".to_string()
}

fn default_storage_limit() -> i64 {
    1024 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            default_storage_limit: default_storage_limit(),
        }
    }
}

/// Upstream CMS proxy configuration.
///
/// The bearer token is never a source constant: set it here or via the
/// `MEDIADECK_API_TOKEN` environment variable (environment wins).
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// Base URL of the upstream CMS API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Bearer token for the upstream API.
    #[serde(default)]
    pub api_token: String,
    /// Logical collection key to opaque collection id mapping.
    #[serde(default)]
    pub collections: HashMap<String, String>,
    /// Hard timeout for upstream calls in seconds.
    #[serde(default = "default_proxy_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.webflow.com/v2".to_string()
}

fn default_proxy_timeout() -> u64 {
    20
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_token: String::new(),
            collections: HashMap::new(),
            timeout_secs: default_proxy_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Console-only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// File storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Upstream proxy configuration.
    #[serde(default)]
    pub proxy: ProxyConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(MediadeckError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| MediadeckError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `MEDIADECK_API_TOKEN`: Override the upstream CMS bearer token
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("MEDIADECK_API_TOKEN") {
            if !token.is_empty() {
                self.proxy.api_token = token;
            }
        }
    }
}
