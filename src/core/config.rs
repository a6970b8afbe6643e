//! Configuration management for the MCP server.
//!
//! Values come from environment variables (after loading `.env` via
//! `dotenvy`), falling back to defaults. Parsing goes through a lookup
//! function so it can be exercised without touching the process
//! environment.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::Error;
use super::transport::TransportConfig;
use crate::domains::schema::SchemaSource;
use crate::fmp::FmpClient;

pub const DEFAULT_SERVER_NAME: &str = "financial-modeling-prep";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Upstream data provider settings.
    pub fmp: FmpConfig,

    /// Where tool, resource and prompt definitions are read from.
    pub schema: SchemaConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Financial Modeling Prep settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct FmpConfig {
    /// Credential attached to every upstream request.
    pub api_key: Option<String>,

    /// Overrides the public v3 endpoint.
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl fmt::Debug for FmpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmpConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for FmpConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FmpConfig {
    /// The configured credential; absent or blank is a startup error.
    pub fn require_api_key(&self) -> Result<&str, Error> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::config("FMP_API_KEY environment variable is required"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the gateway client; fails without a credential.
    pub fn client(&self) -> Result<FmpClient, Error> {
        let api_key = self.require_api_key()?;
        Ok(FmpClient::new(
            api_key,
            self.base_url.as_deref(),
            self.timeout(),
        )?)
    }
}

/// Schema definition source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Directory override; the bundled definitions are used when unset.
    pub dir: Option<PathBuf>,
}

impl SchemaConfig {
    pub fn source(&self) -> SchemaSource {
        SchemaSource::from_option(self.dir.as_deref())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: DEFAULT_SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            fmp: FmpConfig::default(),
            schema: SchemaConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = lookup("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.fmp.api_key = lookup("FMP_API_KEY");
        config.fmp.base_url = lookup("FMP_BASE_URL").filter(|url| !url.trim().is_empty());

        if let Some(raw) = lookup("FMP_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.fmp.timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid FMP_TIMEOUT_SECS value {:?}, using {}s",
                    raw, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config.schema.dir = lookup("MCP_SCHEMA_DIR").map(PathBuf::from);
        config.transport = TransportConfig::from_lookup(&lookup);

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.server.name, "financial-modeling-prep");
        assert_eq!(config.fmp.timeout_secs, 30);
        assert!(config.fmp.base_url.is_none());
        assert!(config.schema.dir.is_none());
        assert_eq!(config.schema.source(), SchemaSource::Embedded);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_reads_fmp_settings() {
        let config = from_pairs(&[
            ("FMP_API_KEY", "abc123"),
            ("FMP_BASE_URL", "https://proxy.local/v3"),
            ("FMP_TIMEOUT_SECS", "5"),
            ("MCP_SCHEMA_DIR", "/etc/fmp/schema"),
        ]);
        assert_eq!(config.fmp.require_api_key().unwrap(), "abc123");
        assert_eq!(config.fmp.base_url.as_deref(), Some("https://proxy.local/v3"));
        assert_eq!(config.fmp.timeout(), Duration::from_secs(5));
        assert_eq!(
            config.schema.source(),
            SchemaSource::from_dir("/etc/fmp/schema")
        );
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        assert_eq!(from_pairs(&[("FMP_TIMEOUT_SECS", "soon")]).fmp.timeout_secs, 30);
        assert_eq!(from_pairs(&[("FMP_TIMEOUT_SECS", "0")]).fmp.timeout_secs, 30);
    }

    #[test]
    fn test_missing_or_blank_api_key_is_fatal() {
        for config in [from_pairs(&[]), from_pairs(&[("FMP_API_KEY", "  ")])] {
            let err = config.fmp.require_api_key().unwrap_err();
            assert_eq!(
                err.to_string(),
                "Configuration error: FMP_API_KEY environment variable is required"
            );
            assert!(config.fmp.client().is_err());
        }
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let config = from_pairs(&[("FMP_API_KEY", "super_secret_key")]);
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
