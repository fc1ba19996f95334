//! Configuration management
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML file,
//! then `COSMIC__SECTION__KEY` environment variables.

use crate::error::{FeedError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "COSMIC";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub location: LocationConfig,
    pub earth: EarthFeedConfig,
    pub space: SpaceFeedConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EarthFeedConfig {
    /// NASA POWER daily point endpoint
    pub base_url: String,
    /// POWER user community (RE, AG, SB)
    pub community: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceFeedConfig {
    /// NASA DONKI base URL (without the /CME or /GST suffix)
    pub base_url: String,
    /// api.nasa.gov key
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR)
}

impl Config {
    /// Load configuration from file, with `COSMIC__*` environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::layered(Some(path.as_ref()), environment())
    }

    /// Load from the first default location that exists. Without a file the
    /// environment still applies on top of the built-in defaults.
    pub fn load_default() -> Result<Self> {
        let paths = [
            "cosmic.toml",
            "config.toml",
            "~/.config/cosmic-forecast/config.toml",
        ];

        let found = paths
            .iter()
            .map(|path| shellexpand::tilde(path).into_owned())
            .find(|path| Path::new(path).exists());

        match found {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No configuration file found, using defaults and environment");
                Self::layered(None, environment())
            }
        }
    }

    /// Load from default locations, falling back to built-in defaults
    pub fn load_or_default() -> Self {
        match Self::load_default() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid configuration: {}", e);
                Self::default()
            }
        }
    }

    fn layered(file: Option<&Path>, env: config::Environment) -> Result<Self> {
        let defaults = config::Config::try_from(&Config::default())
            .map_err(|e| FeedError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = file {
            let name = path.to_str().ok_or_else(|| {
                FeedError::Config(format!("Config path is not valid UTF-8: {}", path.display()))
            })?;
            builder = builder.add_source(config::File::with_name(name));
        }

        builder
            .add_source(env)
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| FeedError::Config(e.to_string()))
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: 25.3387,
            longitude: 49.6005,
        }
    }
}

impl Default for EarthFeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://power.larc.nasa.gov/api/temporal/daily/point".to_string(),
            community: "RE".to_string(),
        }
    }
}

impl Default for SpaceFeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.nasa.gov/DONKI".to_string(),
            api_key: "DEMO_KEY".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}
