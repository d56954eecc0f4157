//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ClientConfig;

/// Backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset or `0` means no explicit timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: self
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

/// Token storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_token_path")]
    pub token_path: String,
}

fn default_token_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("checklist").join("token.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./.checklist_token.json".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
        }
    }
}

impl StorageConfig {
    /// Token file path with a leading `~/` expanded to the home directory
    pub fn resolved_token_path(&self) -> PathBuf {
        match (self.token_path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.token_path),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Runs before logging is initialized, so problems are returned to the
    /// caller instead of being logged here.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("checklist").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                return Self::load_with_env(path);
            }
        }

        let mut config = Config::default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("CHECKLIST_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("CHECKLIST_REQUEST_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(0) => self.api.request_timeout_secs = None,
                Ok(secs) => self.api.request_timeout_secs = Some(secs),
                Err(e) => tracing::warn!(
                    "Ignoring CHECKLIST_REQUEST_TIMEOUT={:?}: {}",
                    timeout,
                    e
                ),
            }
        }

        if let Some(path) = var("CHECKLIST_TOKEN_PATH") {
            self.storage.token_path = path;
        }

        if let Some(level) = var("CHECKLIST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("CHECKLIST_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Checklist Configuration
#
# Environment variables override these settings:
# - CHECKLIST_API_URL
# - CHECKLIST_REQUEST_TIMEOUT
# - CHECKLIST_TOKEN_PATH
# - CHECKLIST_LOG_LEVEL
# - CHECKLIST_LOG_FORMAT

[api]
# Base URL of the checklist backend
base_url = "http://localhost:8080"

# Request timeout in seconds (omit to use the HTTP client's default)
# request_timeout_secs = 30

[storage]
# File holding the bearer token issued at login
token_path = "~/.local/share/checklist/token.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.api.request_timeout_secs.is_none());
        assert!(config.api.client_config().request_timeout.is_none());
        assert_eq!(config.logging.format, "pretty");
        assert!(config.storage.token_path.ends_with("token.json"));
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse(
            r#"
            [api]
            base_url = "https://todo.example.com/api"
            request_timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://todo.example.com/api");
        assert_eq!(
            config.api.client_config().request_timeout,
            Some(Duration::from_secs(10))
        );
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.storage.token_path, "~/.local/share/checklist/token.json");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CHECKLIST_API_URL", "http://10.0.0.2:9000"),
            ("CHECKLIST_REQUEST_TIMEOUT", "3"),
            ("CHECKLIST_TOKEN_PATH", "/tmp/t.json"),
            ("CHECKLIST_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.api.request_timeout_secs, Some(3));
        assert_eq!(config.storage.token_path, "/tmp/t.json");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_zero_or_bad_timeout_means_none() {
        let mut config = Config::default();
        config.api.request_timeout_secs = Some(30);
        config.apply_env_overrides(|key| {
            (key == "CHECKLIST_REQUEST_TIMEOUT").then(|| "0".to_string())
        });
        assert!(config.api.request_timeout_secs.is_none());

        config.api.request_timeout_secs = Some(30);
        config.apply_env_overrides(|key| {
            (key == "CHECKLIST_REQUEST_TIMEOUT").then(|| "soon".to_string())
        });
        assert_eq!(config.api.request_timeout_secs, Some(30));

        let from_file = Config::parse("[api]\nrequest_timeout_secs = 0\n").unwrap();
        assert!(from_file.api.client_config().request_timeout.is_none());
    }

    #[test]
    fn test_token_path_expansion() {
        let storage = StorageConfig {
            token_path: "/var/lib/checklist/token.json".to_string(),
        };
        assert_eq!(
            storage.resolved_token_path(),
            PathBuf::from("/var/lib/checklist/token.json")
        );

        let home_relative = StorageConfig {
            token_path: "~/token.json".to_string(),
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(home_relative.resolved_token_path(), home.join("token.json"));
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/checklist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
