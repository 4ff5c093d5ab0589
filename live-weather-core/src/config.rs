use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TOAST_AUTOHIDE_MS: u64 = 5_000;

/// A fixed position used when the host has no geolocation of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: Option<f64>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the irrigation server, e.g. "http://127.0.0.1:5000".
    pub server_url: String,

    /// Session cookie sent with the weather request, e.g. "session=abc".
    pub session_cookie: Option<String>,

    /// Example TOML:
    /// [position]
    /// latitude = 37.7749
    /// longitude = -122.4194
    /// accuracy_meters = 10.0
    pub position: Option<PositionConfig>,

    /// How long a toast stays up before it dismisses itself. 0 disables.
    pub toast_autohide_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            session_cookie: None,
            position: None,
            toast_autohide_ms: DEFAULT_TOAST_AUTOHIDE_MS,
        }
    }
}

impl Config {
    /// Parsed server origin.
    pub fn server_url(&self) -> Result<Url> {
        Url::parse(&self.server_url)
            .with_context(|| format!("Invalid server URL in config: '{}'", self.server_url))
    }

    pub fn toast_autohide(&self) -> Option<Duration> {
        (self.toast_autohide_ms > 0).then(|| Duration::from_millis(self.toast_autohide_ms))
    }

    pub fn set_position(&mut self, latitude: f64, longitude: f64, accuracy_meters: Option<f64>) {
        self.position = Some(PositionConfig { latitude, longitude, accuracy_meters });
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.server_url()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "irrigation", "live-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
