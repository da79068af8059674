use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/cartsync/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("cartsync").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `store.base_url` is an absolute http(s) URL
    /// - `timing.debounce_ms` is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.store.base_url).map_err(|e| ConfigError::ValidationError {
            message: format!("Invalid store base_url '{}': {}", self.store.base_url, e),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Store base_url '{}' must use http or https",
                    self.store.base_url
                ),
            });
        }

        if self.timing.debounce_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "timing.debounce_ms must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.timing.debounce_ms)
    }

    pub fn ok_flash(&self) -> Duration {
        Duration::from_millis(self.timing.ok_flash_ms)
    }

    pub fn message_visible(&self) -> Duration {
        Duration::from_millis(self.timing.message_visible_ms)
    }
}
