//! User configuration: `<config_dir>/callbook/config.json`, every field optional.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::lookup::DEFAULT_QUIET_PERIOD;

/// Environment variable that overrides [`Config::api_url`].
pub const API_URL_ENV: &str = "CALLBOOK_API_URL";

/// Upper bound the service accepts for `limit`.
const MAX_SEARCH_LIMIT: u32 = 100;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a config directory.
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("invalid API URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the record-search service.
    pub api_url: String,
    /// Quiet period after the last keystroke before a query is sent.
    pub debounce_ms: u64,
    /// Maximum results per multi-field search; service default when unset.
    pub search_limit: Option<u32>,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/".to_string(),
            debounce_ms: DEFAULT_QUIET_PERIOD.as_millis() as u64,
            search_limit: None,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Loads the user's config file (defaults if absent), then applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::load_from(&default_path()?)?;
        Ok(config.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Loads config from `path`. A missing file yields [`Config::default`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Applies overrides from an environment lookup.
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = var(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        self
    }

    /// Parses and validates the API base URL. Only `http` and `https` are accepted.
    pub fn api_base(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: self.api_url.clone(),
            reason,
        };
        let url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme {other:?}"))),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// The configured search limit, clamped to what the service accepts.
    pub fn search_limit(&self) -> Option<u32> {
        self.search_limit.map(|n| n.clamp(1, MAX_SEARCH_LIMIT))
    }
}

/// `~/.config/callbook/config.json` on Linux; platform equivalent elsewhere.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("callbook").join("config.json"))
}
