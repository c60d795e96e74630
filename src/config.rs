//! Configuration management.
//!
//! Two layers live in one TOML file: connection/storage settings for the
//! bridge, and the persisted scrape settings (category, image size, cap)
//! that get replaced wholesale on each accepted `settings set`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::ScrapeSettings;
use crate::{Error, Result};

/// Application settings, persisted as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the Roon bridge endpoint.
    pub bridge_url: String,
    /// Root directory artwork is written under.
    pub art_dir: PathBuf,
    /// Per-request timeout in seconds.
    pub request_timeout: u64,
    /// Base delay between bridge requests in milliseconds.
    pub request_delay_ms: u64,
    /// Persisted scrape settings.
    pub scrape: ScrapeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bridge_url: "http://localhost:9100/".to_string(),
            art_dir: PathBuf::from("art"),
            request_timeout: 30,
            request_delay_ms: 0,
            scrape: ScrapeSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Save settings to `path`, or to the default location when `None`.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()
                .ok_or_else(|| Error::Config("no config directory available".to_string()))?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    pub fn bridge_url(&self) -> Result<Url> {
        Url::parse(&self.bridge_url)
            .map_err(|e| Error::Config(format!("invalid bridge URL {}: {e}", self.bridge_url)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

/// Default config file location: `{config_dir}/artscraper/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("artscraper").join("config.toml"))
}
