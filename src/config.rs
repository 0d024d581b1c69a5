//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `EVALTRACK_*` environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ClientConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Build the HTTP client settings from this section
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Where the bearer token is persisted between runs
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,
}

fn default_session_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("evaltrack").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./evaltrack_session.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
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

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Defaults plus environment variable overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load the first config file found in the default locations
    ///
    /// A missing file is skipped; a file that exists but cannot be read or
    /// parsed is an error.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_first(&Self::search_paths(), |key| std::env::var(key).ok())
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("evaltrack").join("config.toml"));
        }
        paths.push(PathBuf::from("./evaltrack.toml"));
        paths
    }

    fn load_first<F>(paths: &[PathBuf], lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::load(path)?,
            None => Config::default(),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `EVALTRACK_*` overrides using the given variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("EVALTRACK_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("EVALTRACK_TIMEOUT_SECS") {
            self.api.request_timeout_secs =
                timeout.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    key: "EVALTRACK_TIMEOUT_SECS",
                    value: timeout.clone(),
                })?;
        }

        if let Some(file) = lookup("EVALTRACK_SESSION_FILE") {
            self.session.file = file;
        }

        if let Some(level) = lookup("EVALTRACK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("EVALTRACK_LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Evaltrack Configuration
#
# Environment variables override these settings:
# - EVALTRACK_API_URL
# - EVALTRACK_TIMEOUT_SECS
# - EVALTRACK_SESSION_FILE
# - EVALTRACK_LOG_LEVEL
# - EVALTRACK_LOG_FORMAT

[api]
# Evaluation backend base URL
base_url = "http://localhost:5000"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# File holding the bearer token between runs
# file = "~/.local/share/evaltrack/session.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for log shipping)
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
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.session.file.ends_with("session.json"));
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config(), Path::new("generated")).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse(
            "[api]\nbase_url = \"https://eval.example.org/\"\n",
            Path::new("partial"),
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://eval.example.org/");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.api.client_config().base_url, "https://eval.example.org");
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 3").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/evaltrack.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("EVALTRACK_API_URL", "http://backend:9000"),
            ("EVALTRACK_TIMEOUT_SECS", "5"),
            ("EVALTRACK_SESSION_FILE", "/tmp/token.json"),
            ("EVALTRACK_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api.base_url, "http://backend:9000");
        assert_eq!(config.api.request_timeout_secs, 5);
        assert_eq!(config.session.file, "/tmp/token.json");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_timeout_override_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == "EVALTRACK_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnv { key: "EVALTRACK_TIMEOUT_SECS", .. }));
        assert_eq!(err.to_string(), "Invalid EVALTRACK_TIMEOUT_SECS: \"soon\"");
    }

    #[test]
    fn test_load_first_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("evaltrack.toml");
        std::fs::write(&present, "[api]\nbase_url = \"http://eval.local\"\n").unwrap();

        let paths = vec![dir.path().join("missing.toml"), present];
        let config = Config::load_first(&paths, |_| None).unwrap();
        assert_eq!(config.api.base_url, "http://eval.local");

        let config = Config::load_first(&[dir.path().join("missing.toml")], |_| None).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_load_first_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("evaltrack.toml");
        std::fs::write(&broken, "[api\nbase_url = 3").unwrap();

        let err = Config::load_first(&[broken], |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
