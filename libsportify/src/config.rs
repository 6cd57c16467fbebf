//! Configuration management for Sportify

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::types::DEFAULT_LEAGUE;

pub const DEFAULT_AUTH_BASE_URL: &str = "https://dummyjson.com";
pub const DEFAULT_SPORTS_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json/3";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub teams: TeamsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub auth_base_url: String,
    pub sports_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsConfig {
    pub default_league: String,
}

impl Default for TeamsConfig {
    fn default() -> Self {
        Self {
            default_league: DEFAULT_LEAGUE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to
    /// defaults when no config file exists yet
    pub fn load_or_default() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default_config());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig {
                auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
                sports_base_url: DEFAULT_SPORTS_BASE_URL.to_string(),
            },
            storage: StorageConfig {
                path: "~/.local/share/sportify/storage.db".to_string(),
            },
            teams: TeamsConfig::default(),
        }
    }
}

/// Resolve the configuration file path under the XDG config directory
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("SPORTIFY_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("sportify").join("config.toml"))
}

/// Resolve the storage database path
///
/// Priority: `SPORTIFY_STORAGE_PATH`, then the configured path, then the
/// XDG data directory.
pub fn resolve_storage_path(configured: Option<&str>) -> Result<PathBuf> {
    if let Ok(path) = std::env::var("SPORTIFY_STORAGE_PATH") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    if let Some(path) = configured {
        return Ok(PathBuf::from(shellexpand::tilde(path).to_string()));
    }

    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("sportify").join("storage.db"))
}
