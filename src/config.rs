//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! tide-panel.toml file. It provides a centralized way to configure the
//! default NOAA station, the station-browser bounding box, and panel
//! display options.

use crate::stations::StationFilter;
use crate::{favorites::FAVORITES_FILE, tides::DEFAULT_TIDE_COUNT, Bounds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory.
const CONFIG_FILE: &str = "tide-panel.toml";

/// Application configuration loaded from tide-panel.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default NOAA station for the prediction panel
    pub station: StationConfig,
    /// Bounding box used by the station browser
    pub map: MapConfig,
    /// Panel display configuration
    pub display: DisplayConfig,
    /// Favorites persistence configuration
    pub favorites: FavoritesConfig,
}

/// Default NOAA tide station
#[derive(Debug, Deserialize, Serialize)]
pub struct StationConfig {
    /// NOAA station ID (e.g., "8418150" for Portland, ME)
    pub id: String,
    /// Human-readable station name for the panel header
    pub name: String,
}

/// Geographic window the station browser queries
#[derive(Debug, Deserialize, Serialize)]
pub struct MapConfig {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl MapConfig {
    /// The configured window as a request bounding box.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            north: self.north,
            south: self.south,
            east: self.east,
            west: self.west,
        }
    }
}

/// Panel display configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// How many upcoming tide events the panel shows
    pub tide_count: usize,
    /// How many days of predictions to request ahead of today
    pub prediction_days: i64,
    /// Station-list filter applied when none is given on the command line
    pub filter: StationFilter,
}

/// Favorites persistence configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct FavoritesConfig {
    /// File the favorites list is stored in
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            station: StationConfig {
                id: "8418150".to_string(),
                name: "Portland, ME".to_string(),
            },
            map: MapConfig {
                // Casco Bay and the southern Maine coast
                north: 43.9,
                south: 43.3,
                east: -69.8,
                west: -70.5,
            },
            display: DisplayConfig {
                tide_count: DEFAULT_TIDE_COUNT,
                prediction_days: 7,
                filter: StationFilter::All,
            },
            favorites: FavoritesConfig {
                path: FAVORITES_FILE.to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from tide-panel.toml.
    /// Falls back to default configuration if the file doesn't exist or is invalid.
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from the specified path.
    /// Falls back to default configuration if the file doesn't exist or is invalid.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(station = %config.station.name, "loaded configuration");
                    config
                }
                Err(err) => {
                    warn!(error = %err, "invalid config file format, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!("no config file found, using default configuration (Portland, ME)");
                Self::default()
            }
        }
    }

    /// Save the current configuration to tide-panel.toml.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(CONFIG_FILE, contents)?;
        Ok(())
    }
}
