//! Configuration settings for Stonkwatch.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quote provider configuration.
    pub provider: ProviderConfig,
    /// Refresh scheduling.
    pub refresh: RefreshConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::config(e.to_string()))
    }

    fn default_path() -> PathBuf {
        super::config_dir()
            .map(|p| p.join("config.toml"))
            .unwrap_or_else(|_| PathBuf::from("config.toml"))
    }
}

/// Quote provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Yahoo Finance API base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Rate limit (requests per second).
    pub rate_limit: u32,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            timeout_secs: 10,
            rate_limit: 5,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36".to_string(),
        }
    }
}

impl ProviderConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Refresh scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between automatic refreshes.
    pub period_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { period_secs: 60 }
    }
}

impl RefreshConfig {
    /// Refresh period as a duration. Never zero.
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs.max(1))
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Input poll interval in milliseconds.
    pub tick_rate_ms: u64,
    /// Column where the price is drawn.
    pub price_column: u16,
    /// Column where the percent change is drawn.
    pub change_column: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            price_column: 20,
            change_column: 30,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Enter command mode.
    pub command: String,
    /// Quit the application.
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            command: ":".to_string(),
            quit: "Ctrl+c".to_string(),
        }
    }
}
