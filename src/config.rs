//! Application configuration: TOML file plus environment overrides

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::constants::{self, env_vars};
use crate::error::AppError;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the upstream fixtures API. Should include the scheme.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// API key sent as the `X-API-KEY` header on every upstream call
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// TCP port the HTTP server listens on
    #[serde(default = "default_port")]
    pub listen_port: u16,
    /// How many calendar days ahead each pipeline run queries
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: u32,
    /// Upstream HTTP timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Path to the log file. If not specified, logs go to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_api_base_url() -> String {
    constants::DEFAULT_API_BASE_URL.to_string()
}

fn default_api_key() -> String {
    constants::DEFAULT_API_KEY.to_string()
}

fn default_port() -> u16 {
    constants::DEFAULT_PORT
}

fn default_lookahead_days() -> u32 {
    constants::pipeline::DEFAULT_LOOKAHEAD_DAYS
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            api_key: default_api_key(),
            listen_port: default_port(),
            lookahead_days: default_lookahead_days(),
            http_timeout_seconds: default_http_timeout(),
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// A missing file is not an error: this is a server, so the defaults
    /// plus environment variables must be enough to start.
    ///
    /// # Environment Variables
    /// - `MATCHDAY_API_BASE_URL` - Override API base URL
    /// - `MATCHDAY_API_KEY` - Override API key
    /// - `MATCHDAY_PORT` - Override listen port
    /// - `MATCHDAY_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `MATCHDAY_LOG_FILE` - Override log file path
    ///
    /// Environment variables take precedence over the config file.
    pub async fn load() -> Result<Self, AppError> {
        Self::load_from_path(&Self::get_config_path()).await
    }

    /// Loads configuration from an explicit path, applying env overrides
    pub async fn load_from_path(config_path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(config_path).exists() {
            let content = fs::read_to_string(config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), AppError> {
        if let Ok(base_url) = std::env::var(env_vars::API_BASE_URL)
            && !base_url.is_empty()
        {
            self.api_base_url = base_url;
        }
        if let Ok(api_key) = std::env::var(env_vars::API_KEY)
            && !api_key.is_empty()
        {
            self.api_key = api_key;
        }
        if let Ok(port) = std::env::var(env_vars::PORT)
            && !port.is_empty()
        {
            self.listen_port = port
                .parse()
                .map_err(|_| AppError::config_error(format!("Invalid {}: {port}", env_vars::PORT)))?;
        }
        if let Ok(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            && !timeout.is_empty()
        {
            self.http_timeout_seconds = timeout.parse().map_err(|_| {
                AppError::config_error(format!("Invalid {}: {timeout}", env_vars::HTTP_TIMEOUT))
            })?;
        }
        if let Ok(log_file) = std::env::var(env_vars::LOG_FILE)
            && !log_file.is_empty()
        {
            self.log_file_path = Some(log_file);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), AppError> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(AppError::config_error(format!(
                "API base URL must include a scheme: {}",
                self.api_base_url
            )));
        }
        if self.api_key.is_empty() {
            return Err(AppError::config_error("API key must not be empty"));
        }
        if self.http_timeout_seconds == 0 {
            return Err(AppError::config_error("HTTP timeout must be positive"));
        }
        Ok(())
    }

    /// Saves the configuration to the default config file location,
    /// creating the directory if needed.
    pub async fn save(&self) -> Result<(), AppError> {
        self.save_to_path(&Self::get_config_path()).await
    }

    /// Saves the configuration to an explicit path
    pub async fn save_to_path(&self, config_path: &str) -> Result<(), AppError> {
        if let Some(config_dir) = Path::new(config_path).parent()
            && !config_dir.exists()
        {
            fs::create_dir_all(config_dir).await?;
        }

        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(config_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Platform-specific path of the config file
    pub fn get_config_path() -> String {
        dirs::config_dir()
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join("matchday")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }

    /// Platform-specific directory for log files
    pub fn get_log_dir_path() -> String {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join("matchday")
            .join("logs")
            .to_string_lossy()
            .to_string()
    }
}
