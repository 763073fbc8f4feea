//! Application Configuration
//!
//! Persisted TOML settings: backend location, table defaults and locale.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{
    API_URL_ENV, CONFIG_FILE, DEFAULT_API_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every resource path is joined onto
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Table defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub page_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Persisted application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub table: TableConfig,
    /// Language tag ("en", "es"); detected from the system when unset
    pub locale: Option<String>,
}

fn get_config_path() -> Result<PathBuf> {
    let path = get_or_create_config_dir()?.join(CONFIG_FILE);
    if !path.exists() {
        std::fs::write(&path, "")?;
    }
    Ok(path)
}

impl AppConfig {
    /// Load from the platform config directory, then apply the environment
    pub fn try_load() -> Result<Self> {
        let path = get_config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env(std::env::var(API_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit file; an empty file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(path)?;
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(&value)?)
    }

    /// Save to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let value = toml::to_string_pretty(self)?;
        std::fs::write(path, value)?;
        Ok(())
    }

    /// Save to the platform config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    /// Override the base URL from `QUALITY_API_URL` when it is set and non-blank
    pub fn apply_env(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::Invalid {
                message: "api.base_url must not be empty".to_string(),
            });
        }
        if self.table.page_size == 0 {
            return Err(Error::Invalid {
                message: "table.page_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
