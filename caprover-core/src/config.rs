//! Client configuration.
//!
//! Holds the server endpoint and credential plus logging preferences.
//! Configuration can be built in code or loaded from a TOML file; nothing is
//! written back unless the caller asks for it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{CaproverError, CaproverResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Control-plane URL (e.g. "https://captain.example.com").
    #[serde(default)]
    pub endpoint: String,

    /// Dashboard password used for login.
    #[serde(default)]
    pub password: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_api_timeout")]
    pub api_timeout_ms: u64,

    /// TCP connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Accept self-signed or otherwise invalid TLS certificates.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, logs go to the console only.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured output for the log file.
    #[serde(default)]
    pub json_output: bool,
}

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_connect_timeout() -> u64 {
    constants::DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            password: String::new(),
            api_timeout_ms: default_api_timeout(),
            connect_timeout_ms: default_connect_timeout(),
            accept_invalid_certs: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ServerConfig {
    /// Server settings for an endpoint and password, other fields defaulted.
    pub fn new(endpoint: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Check that both the endpoint and the password are present.
    pub fn validate(&self) -> CaproverResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(CaproverError::MissingConfig("server.endpoint".into()));
        }
        if self.password.is_empty() {
            return Err(CaproverError::MissingConfig("server.password".into()));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from the default config file path, or defaults if
    /// no file exists there.
    pub fn load_default() -> CaproverResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> CaproverResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> CaproverResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CaproverError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> CaproverResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| CaproverError::Config("no config directory on this platform".into()))?;
        Ok(base.join("caprover-client").join("config.toml"))
    }

    /// Check whether the server connection is configured.
    pub fn is_server_configured(&self) -> bool {
        !self.server.endpoint.is_empty() && !self.server.password.is_empty()
    }

    /// Sanitize and normalize an endpoint URL.
    ///
    /// Strips whitespace and stray quotes, defaults the scheme to https and
    /// drops trailing slashes so API paths can be appended directly.
    pub fn sanitize_endpoint(endpoint: &str) -> String {
        let trimmed = endpoint.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}
