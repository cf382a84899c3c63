//! Configuration management for investatrack
//!
//! This module handles loading, validation, and management of
//! the front end configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorDetails, ConfigErrorSeverity, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Backend REST service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base address every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds, transport default when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

/// What list pages show when their fetch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListErrorPolicy {
    /// Log a warning and render the empty state
    Silent,
    /// Render an error banner
    Banner,
}

impl Default for ListErrorPolicy {
    fn default() -> Self {
        ListErrorPolicy::Silent
    }
}

impl std::str::FromStr for ListErrorPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" => Ok(ListErrorPolicy::Silent),
            "banner" => Ok(ListErrorPolicy::Banner),
            _ => Err(format!("Invalid list error policy: {}", s)),
        }
    }
}

impl std::fmt::Display for ListErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListErrorPolicy::Silent => write!(f, "silent"),
            ListErrorPolicy::Banner => write!(f, "banner"),
        }
    }
}

/// Rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub list_errors: ListErrorPolicy,
    /// Symbol placed before formatted amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// chrono format string for transaction dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            list_errors: ListErrorPolicy::default(),
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}

/// Add Transaction form sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Open forms kept at once; the oldest is dropped beyond this
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_max_sessions() -> usize {
    64
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend service settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Rendering settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Form session settings
    #[serde(default)]
    pub forms: FormsConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string_lossy().into_owned(),
                }
            } else {
                ConfigError::IoError
            }
        })?;

        Self::from_yaml(&content)
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path.to_path_buf()) {
            Err(e) if e.severity() == ConfigErrorSeverity::Warning => {
                log::warn!("{}, using defaults", e);
                Ok(Config::default())
            }
            other => other,
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|_| ConfigError::InvalidYaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let base_url = self.backend.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.backend.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "backend.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0 or left unset".to_string(),
            });
        }

        if self.forms.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "forms.max_sessions".to_string(),
                reason: "At least one form session must be allowed".to_string(),
            });
        }

        if self.display.date_format.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "display.date_format".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the HTTP server binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.backend.base_url, "http://localhost:8080");
        assert_eq!(config.display.list_errors, ListErrorPolicy::Silent);
        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.forms.max_sessions, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bundled_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.backend.timeout_secs, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("backend:\n  base_url: https://api.example.com\ndisplay:\n  list_errors: banner\n").unwrap();
        assert_eq!(config.backend.base_url, "https://api.example.com");
        assert_eq!(config.display.list_errors, ListErrorPolicy::Banner);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.display.date_format, "%-m/%-d/%Y");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = Config::from_yaml("backend:\n  base_url: localhost:8080\n").unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "backend.base_url"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_sessions_rejected() {
        assert!(Config::from_yaml("forms:\n  max_sessions: 0\n").is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(Config::from_yaml("server: [1, 2"), Err(ConfigError::InvalidYaml)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_or_default(Path::new("/nonexistent/investatrack.yaml")).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_list_error_policy_from_str() {
        assert_eq!("Banner".parse::<ListErrorPolicy>(), Ok(ListErrorPolicy::Banner));
        assert!("loud".parse::<ListErrorPolicy>().is_err());
        assert_eq!(ListErrorPolicy::Silent.to_string(), "silent");
    }
}
