//! Configuration
//!
//! Loaded from a RON file, with hardcoded defaults when the file is missing.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::DayBoundary;
use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Practice server base URL
    pub api_base_url: String,
    /// Per-request timeout for server calls
    pub request_timeout_ms: u64,
    /// Profile to operate on
    pub user_id: String,
    /// Day boundary used for streaks
    pub day_boundary: DayBoundary,
    /// Override for the profile directory
    pub data_dir: Option<PathBuf>,
    /// Never contact the server
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            user_id: "local".to_string(),
            day_boundary: DayBoundary::default(),
            data_dir: None,
            offline: false,
        }
    }
}

impl Config {
    /// Load config.
    ///
    /// An explicit path must exist and parse. Without one, the platform
    /// config file is tried and defaults are used if it is missing or broken.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path)?.validated();
        }

        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        match Self::from_file(&path).and_then(Self::validated) {
            Ok(config) => {
                log::info!("Config loaded from {:?}", path);
                Ok(config)
            }
            Err(e) => {
                log::warn!("{}. Using defaults.", e);
                Ok(Self::default())
            }
        }
    }

    /// Parse a RON config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("request_timeout_ms must be positive".to_string()));
        }
        if self.user_id.trim().is_empty() {
            return Err(ConfigError::Invalid("user_id must not be empty".to_string()));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api_base_url must be an http(s) URL, got {:?}",
                self.api_base_url
            )));
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Get the default config file path
pub fn default_config_path() -> Option<PathBuf> {
    use directories::ProjectDirs;

    ProjectDirs::from("com", "sightreadpro", "SightReadPro")
        .map(|dirs| dirs.config_dir().join("config.ron"))
}
