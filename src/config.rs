//! Configuration loading and constants.
//!
//! Loads the service configuration from a TOML file and defines defaults for
//! the bind address, logging and shutdown. `AppConfig` is the root configuration
//! struct; every section is optional so an empty file (or no file) is valid.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP Server Defaults
// =============================================================================

/// Default bind host: all interfaces
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Seconds to wait for in-flight connections after a shutdown signal
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// HTTP Response Headers
// =============================================================================

/// Liveness answers must never be served from a cache
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

/// Response header carrying the request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = formatcp!(
    "{}=debug,tower_http=debug",
    env!("CARGO_PKG_NAME")
);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Key-provider backing the `key` field of the health response
    #[serde(default)]
    pub key: KeyConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }
}

/// Where the health response's `key` comes from.
///
/// `None` leaves the field out of the response entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum KeyConfig {
    #[default]
    None,
    /// Fixed value from this file
    Static { value: String },
    /// Environment variable, read on every request
    Env { var: String },
    /// File contents, read on every request
    File { path: String },
}

impl KeyConfig {
    /// Whether responses carry a `key` field
    pub fn is_enabled(&self) -> bool {
        !matches!(self, KeyConfig::None)
    }

    /// Name of the source, safe to log (never includes the key itself)
    pub fn source_name(&self) -> &'static str {
        match self {
            KeyConfig::None => "none",
            KeyConfig::Static { .. } => "static",
            KeyConfig::Env { .. } => "env",
            KeyConfig::File { .. } => "file",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Text,
    /// Structured, one JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load from `path`, falling back to built-in defaults when the file is absent.
    ///
    /// Returns the config and whether it came from the file.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<(Self, bool), ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok((config, true)),
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok((Self::default(), false))
            }
            Err(e) => Err(e),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match &self.key {
            KeyConfig::Env { var } if var.is_empty() => Err(ConfigError::Validation(
                "key.var must not be empty when key.source = \"env\"".to_string(),
            )),
            KeyConfig::File { path } if path.is_empty() => Err(ConfigError::Validation(
                "key.path must not be empty when key.source = \"file\"".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
