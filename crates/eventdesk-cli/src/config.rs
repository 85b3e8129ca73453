/*
[INPUT]:  YAML configuration file and EVENTDESK__* environment variables
[OUTPUT]: Parsed console configuration
[POS]:    Configuration layer - backend connection and session storage
[UPDATE]: When adding new configuration options
*/

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use eventdesk_adapter::ClientConfig;
use eventdesk_adapter::http::DEFAULT_BASE_URL;

/// Prefix for environment overrides, e.g. `EVENTDESK__API__BASE_URL`
pub const ENV_PREFIX: &str = "EVENTDESK";

/// Top-level configuration for the console
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Default username for `login`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Where the session cookie is persisted between runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
    /// Page size for list commands
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            username: None,
            session_file: None,
            page_size: default_page_size(),
        }
    }
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> u32 {
    20
}

impl AppConfig {
    /// Load configuration from an optional YAML file plus process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment map in place of the process environment
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            if !path.exists() {
                return Err(anyhow!("config file {} does not exist", path.display()));
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(anyhow!("api.base_url cannot be empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(anyhow!("api.timeout_secs must be greater than zero"));
        }
        if self.api.connect_timeout_secs == 0 {
            return Err(anyhow!("api.connect_timeout_secs must be greater than zero"));
        }
        if !(1..=500).contains(&self.page_size) {
            return Err(anyhow!("page_size must be between 1 and 500"));
        }
        Ok(())
    }

    /// Session file path, defaulting to the platform data directory
    pub fn session_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.session_file {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow!("Could not determine data directory"))?
            .join("eventdesk");
        Ok(data_dir.join("session.json"))
    }
}
