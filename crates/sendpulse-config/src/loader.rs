//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "sendpulse.toml",
    "config.toml",
    "./config/sendpulse.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        self.load_with(|key| env::var(key).ok())
    }

    /// Same as [`load`](Self::load) but reads variables through `lookup`
    pub fn load_with<F>(&self, lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = self.find_config_file(&lookup)? {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        self.apply_env_overrides(&mut config, &lookup);
        config.sendpulse.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file<F>(&self, lookup: &F) -> Result<Option<PathBuf>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // An explicitly requested file must exist
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Ok(Some(path.clone()));
            }
            return Err(ConfigError::ValidationError(format!(
                "config file {} does not exist",
                path.display()
            )));
        }

        if let Some(path) = lookup("SENDPULSE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        Ok(CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists()))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides<F>(&self, config: &mut AppConfig, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SENDPULSE_ID") {
            config.sendpulse.id = Some(val);
        }
        if let Some(val) = lookup("SENDPULSE_SECRET") {
            config.sendpulse.secret = Some(val);
        }
        if let Some(val) = lookup("SENDPULSE_HOST") {
            config.sendpulse.host = val;
        }
        if let Some(val) = lookup("SENDPULSE_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                config.sendpulse.timeout_ms = timeout;
            }
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sendpulse.toml");
        std::fs::write(
            &path,
            "[sendpulse]\nid = \"file-id\"\nsecret = \"file-secret\"\n",
        )
        .unwrap();

        let config = ConfigLoader::with_path(&path)
            .load_with(vars(&[("SENDPULSE_SECRET", "env-secret"), ("SENDPULSE_TIMEOUT_MS", "500")]))
            .unwrap();

        assert_eq!(config.sendpulse.id.as_deref(), Some("file-id"));
        assert_eq!(config.sendpulse.secret.as_deref(), Some("env-secret"));
        assert_eq!(config.sendpulse.timeout_ms, 500);
    }

    #[test]
    fn test_config_path_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[sendpulse]\nhost = \"http://localhost:1234/\"\n").unwrap();

        let config = ConfigLoader::new()
            .load_with(vars(&[("SENDPULSE_CONFIG", path.to_str().unwrap())]))
            .unwrap();

        assert_eq!(config.sendpulse.host, "http://localhost:1234/");
    }

    #[test]
    fn test_missing_env_config_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let config = ConfigLoader::new()
            .load_with(vars(&[
                ("SENDPULSE_CONFIG", missing.to_str().unwrap()),
                ("SENDPULSE_ID", "env-id"),
            ]))
            .unwrap();

        assert_eq!(config.sendpulse.id.as_deref(), Some("env-id"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::with_path(dir.path().join("absent.toml"))
            .load_with(vars(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_invalid_env_host_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sendpulse.toml");
        std::fs::write(&path, "").unwrap();

        let err = ConfigLoader::with_path(&path)
            .load_with(vars(&[("SENDPULSE_HOST", "not-a-url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_unparseable_timeout_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sendpulse.toml");
        std::fs::write(&path, "").unwrap();

        let config = ConfigLoader::with_path(&path)
            .load_with(vars(&[("SENDPULSE_TIMEOUT_MS", "soon")]))
            .unwrap();
        assert_eq!(config.sendpulse.timeout_ms, 30_000);
    }
}
