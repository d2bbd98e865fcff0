//! Configuration and settings management.
//!
//! Settings are persisted to the user's config directory as JSON
//! (`~/.config/mailpane/settings.json` or the platform equivalent) and
//! loaded at startup. Every field has a default so a missing file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mail backend endpoint configuration.
    pub backend: BackendSettings,
    /// Update feed reconnect/reload behavior.
    pub feed: FeedSettings,
}

/// Mail backend endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the webmail backend.
    pub base_url: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:1337".to_string(),
        }
    }
}

/// Update feed behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Delay before reconnecting after an interrupted stream, in seconds.
    pub reconnect_delay_seconds: u64,
    /// Delay before the full-state-reload fallback when the stream cannot
    /// be established, in seconds.
    pub reload_delay_seconds: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            reconnect_delay_seconds: 3,
            reload_delay_seconds: 5,
        }
    }
}

impl FeedSettings {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_seconds)
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_secs(self.reload_delay_seconds)
    }
}

impl Settings {
    /// Default on-disk location of the settings file.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "mailpane")
            .context("could not resolve a config directory")?;
        Ok(dirs.config_dir().join("settings.json"))
    }

    /// Loads settings from the default location; a missing file yields
    /// defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Loads settings from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing settings from {}", path.display()))
    }

    /// Writes settings to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("serializing settings")?;
        std::fs::write(path, raw).with_context(|| format!("writing {}", path.display()))
    }
}
