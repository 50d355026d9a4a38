//! Sendpulse Configuration System
//!
//! TOML-based configuration for the Sendpulse client with environment
//! variable override support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Host used when neither the caller nor the config names one.
pub const DEFAULT_HOST: &str = "https://api.sendpulse.com/";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root configuration document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sendpulse: SendpulseConfig,
}

/// `[sendpulse]` table
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SendpulseConfig {
    /// OAuth2 client id
    pub id: Option<String>,
    /// OAuth2 client secret
    pub secret: Option<String>,
    /// API base URL, always ending in `/` once normalized
    pub host: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    pub user_agent: Option<String>,
}

impl Default for SendpulseConfig {
    fn default() -> Self {
        Self {
            id: None,
            secret: None,
            host: DEFAULT_HOST.to_string(),
            timeout_ms: 30_000,
            user_agent: None,
        }
    }
}

impl std::fmt::Debug for SendpulseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendpulseConfig")
            .field("id", &self.id)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl SendpulseConfig {
    /// Apply values given explicitly by the caller. Explicit values win over
    /// whatever the file or environment provided; empty strings count as unset.
    pub fn with_overrides(
        mut self,
        id: Option<String>,
        secret: Option<String>,
        host: Option<String>,
    ) -> Self {
        if let Some(id) = id.filter(|v| !v.is_empty()) {
            self.id = Some(id);
        }
        if let Some(secret) = secret.filter(|v| !v.is_empty()) {
            self.secret = Some(secret);
        }
        if let Some(host) = host.filter(|v| !v.is_empty()) {
            self.host = host;
        }
        self
    }

    /// Host with a guaranteed trailing slash
    pub fn normalized_host(&self) -> String {
        if self.host.ends_with('/') {
            self.host.clone()
        } else {
            format!("{}/", self.host)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "sendpulse.host must be an http(s) URL, got {:?}",
                self.host
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "sendpulse.timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load()
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# Sendpulse client configuration
# Environment variables override these settings

[sendpulse]
id = ""
secret = ""
host = "https://api.sendpulse.com/"
timeout_ms = 30000
"#
        .to_string()
    }
}

impl FromStr for AppConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: AppConfig = toml::from_str(s)?;
        config.sendpulse.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.sendpulse.host, DEFAULT_HOST);
        assert!(config.sendpulse.id.is_none());
        assert!(config.sendpulse.secret.is_none());
        assert_eq!(config.sendpulse.timeout_ms, 30_000);
    }

    #[test]
    fn test_parse_partial_table() {
        let config: AppConfig = r#"
[sendpulse]
id = "abc"
secret = "xyz"
"#
        .parse()
        .unwrap();

        assert_eq!(config.sendpulse.id.as_deref(), Some("abc"));
        assert_eq!(config.sendpulse.secret.as_deref(), Some("xyz"));
        assert_eq!(config.sendpulse.host, DEFAULT_HOST);
    }

    #[test]
    fn test_example_toml_parses() {
        let config: AppConfig = AppConfig::example_toml().parse().unwrap();
        assert_eq!(config.sendpulse.timeout_ms, 30_000);
    }

    #[test]
    fn test_rejects_non_http_host() {
        let err = "[sendpulse]\nhost = \"ftp://example.com\"\n"
            .parse::<AppConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = "[sendpulse]\ntimeout_ms = 0\n".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_explicit_values_win() {
        let config = SendpulseConfig {
            id: Some("from-file".to_string()),
            ..Default::default()
        }
        .with_overrides(
            Some("explicit".to_string()),
            Some(String::new()),
            Some("http://localhost:9000".to_string()),
        );

        assert_eq!(config.id.as_deref(), Some("explicit"));
        assert!(config.secret.is_none());
        assert_eq!(config.normalized_host(), "http://localhost:9000/");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = SendpulseConfig {
            secret: Some("super-secret".to_string()),
            ..Default::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sendpulse.toml");
        std::fs::write(&path, "[sendpulse]\nid = \"file-id\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.sendpulse.id.as_deref(), Some("file-id"));
    }
}
