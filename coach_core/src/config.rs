//! Configuration file support for the AI Coach tools.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/ai-coach/config.toml`.

use crate::{Error, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub coach: CoachConfig,
}

/// Remote coaching endpoint configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoachConfig {
    /// URL the prompt is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Hard deadline for one feedback request
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_health_timeout_ms")]
    pub health_timeout_ms: u64,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            health_timeout_ms: default_health_timeout_ms(),
        }
    }
}

impl CoachConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }

    /// Parse the endpoint, rejecting anything but absolute http(s) URLs
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| Error::Config(format!("Invalid endpoint {:?}: {}", self.endpoint, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::Config(format!(
                "Unsupported endpoint scheme {:?} in {:?}",
                other, self.endpoint
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;
        if self.timeout_ms == 0 {
            return Err(Error::Config("timeout_ms must be greater than zero".into()));
        }
        if self.health_timeout_ms == 0 {
            return Err(Error::Config(
                "health_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

// Default value functions
fn default_endpoint() -> String {
    "http://localhost:8000/call".into()
}

/// Eight minutes; generation on the coaching service is slow.
fn default_timeout_ms() -> u64 {
    480_000
}

fn default_health_timeout_ms() -> u64 {
    5_000
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.coach.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("Neither a config dir nor HOME is available".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("ai-coach").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}
