//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the marine-config.toml file.
//! It provides a centralized way to configure the buoy and tide stations, the upstream
//! endpoints, and the HTTP client timeout.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "marine-config.toml";

/// Application configuration loaded from marine-config.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Buoy and tide station configuration
    pub station: StationConfig,
    /// Upstream data sources
    pub endpoints: EndpointConfig,
    /// HTTP client settings
    pub http: HttpConfig,
}

/// Station identifiers for the two data feeds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationConfig {
    /// NDBC buoy id (e.g., "44013" for Boston approach)
    pub buoy_id: String,
    /// NOAA tide station id (e.g., "8443970" for Boston, MA)
    pub tide_station_id: String,
    /// Human-readable name for the report header
    pub name: String,
}

/// Base URLs for the buoy feed and tide API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Directory holding `{buoy_id}.txt` realtime files
    pub buoy_base_url: String,
    /// Tide prediction `datagetter` endpoint
    pub tide_base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            station: StationConfig {
                buoy_id: "44013".to_string(),
                tide_station_id: "8443970".to_string(),
                name: "Boston, MA".to_string(),
            },
            endpoints: EndpointConfig {
                buoy_base_url: "https://www.ndbc.noaa.gov/data/realtime2".to_string(),
                tide_base_url: "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter"
                    .to_string(),
            },
            http: HttpConfig { timeout_secs: 10 },
        }
    }
}

impl Config {
    /// Load configuration from marine-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    tracing::info!(station = %config.station.name, "loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Build the shared HTTP client with the configured timeout.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.http.timeout())
            .user_agent(concat!("marine-conditions/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}
