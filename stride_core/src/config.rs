//! Configuration file support for Stride.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/stride/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::map::TileLayer;
use crate::types::LatLng;
use crate::{Error, Result};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub location: LocationConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Map view configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapConfig {
    /// Zoom used when the map first opens on the user's position
    #[serde(default = "default_start_zoom")]
    pub start_zoom: u8,

    /// Zoom used when re-centring on a selected workout
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: u8,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,

    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    #[serde(default = "default_attribution")]
    pub attribution: String,

    /// Pan animation length when re-centring, in seconds
    #[serde(default = "default_pan_duration_secs")]
    pub pan_duration_secs: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            start_zoom: default_start_zoom(),
            focus_zoom: default_focus_zoom(),
            max_zoom: default_max_zoom(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            pan_duration_secs: default_pan_duration_secs(),
        }
    }
}

impl MapConfig {
    pub fn tile_layer(&self) -> TileLayer {
        TileLayer {
            url_template: self.tile_url.clone(),
            max_zoom: self.max_zoom,
            attribution: self.attribution.clone(),
        }
    }
}

/// Fallback coordinate used where no positioning service exists
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_lat")]
    pub lat: f64,

    #[serde(default = "default_lng")]
    pub lng: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            lat: default_lat(),
            lng: default_lng(),
        }
    }
}

impl LocationConfig {
    pub fn coords(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("stride")
}

fn default_start_zoom() -> u8 {
    13
}

fn default_focus_zoom() -> u8 {
    13
}

fn default_max_zoom() -> u8 {
    19
}

fn default_tile_url() -> String {
    TileLayer::default().url_template
}

fn default_attribution() -> String {
    TileLayer::default().attribution
}

fn default_pan_duration_secs() -> f64 {
    1.0
}

fn default_lat() -> f64 {
    51.505
}

fn default_lng() -> f64 {
    -0.09
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("stride").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.map.start_zoom, 13);
        assert_eq!(config.map.max_zoom, 19);
        assert_eq!(config.map.pan_duration_secs, 1.0);
        assert!(config.map.tile_url.contains("openstreetmap"));
        assert_eq!(config.location.coords(), LatLng::new(51.505, -0.09));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.map.start_zoom, parsed.map.start_zoom);
        assert_eq!(config.map.tile_url, parsed.map.tile_url);
        assert_eq!(config.location.lat, parsed.location.lat);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[map]
focus_zoom = 15

[location]
lat = 35.68
lng = 139.69
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.map.focus_zoom, 15);
        assert_eq!(config.map.start_zoom, 13); // default
        assert_eq!(config.location.coords(), LatLng::new(35.68, 139.69));
    }

    #[test]
    fn test_save_and_load_from() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.map.focus_zoom = 16;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.map.focus_zoom, 16);
    }
}
