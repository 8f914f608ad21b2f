//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/pindrop/config.toml

pub mod defaults;

use crate::constants::api::NOMINATIM_URL;
use crate::constants::picker::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_ZOOM};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for picker sessions
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Location settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Geocoding backend settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Default values for picker sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Starting latitude when none is given
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Starting longitude when none is given
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Starting zoom level
    #[serde(default = "default_zoom")]
    pub zoom: f32,

    /// Whether panels display raw coordinates
    #[serde(default = "default_true")]
    pub show_coordinates: bool,

    /// Whether an address is mandatory before confirming
    #[serde(default = "default_true")]
    pub address_required: bool,

    /// Default output format for a confirmed pick
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Location settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// If true, start from the IP-derived location when none is given
    #[serde(default)]
    pub default_here: bool,
}

/// Geocoding backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Nominatim-compatible endpoint base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Preferred language for returned addresses
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_geocoder_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with lookups
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}
fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}
fn default_zoom() -> f32 {
    DEFAULT_ZOOM
}
fn default_true() -> bool {
    true
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_endpoint() -> String {
    NOMINATIM_URL.to_string()
}
fn default_accept_language() -> String {
    DEFAULT_ACCEPT_LANGUAGE.to_string()
}
fn default_geocoder_timeout() -> u64 {
    DEFAULT_GEOCODER_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},15z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=18/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

// Implement Default traits
impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            zoom: default_zoom(),
            show_coordinates: true,
            address_required: true,
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            accept_language: default_accept_language(),
            timeout_secs: default_geocoder_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            // Create default config
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "latitude"] => Some(self.defaults.latitude.to_string()),
            ["defaults", "longitude"] => Some(self.defaults.longitude.to_string()),
            ["defaults", "zoom"] => Some(self.defaults.zoom.to_string()),
            ["defaults", "show_coordinates"] => Some(self.defaults.show_coordinates.to_string()),
            ["defaults", "address_required"] => Some(self.defaults.address_required.to_string()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["location", "default_here"] => Some(self.location.default_here.to_string()),

            ["geocoder", "endpoint"] => Some(self.geocoder.endpoint.clone()),
            ["geocoder", "accept_language"] => Some(self.geocoder.accept_language.clone()),
            ["geocoder", "timeout_secs"] => Some(self.geocoder.timeout_secs.to_string()),
            ["geocoder", "user_agent"] => Some(self.geocoder.user_agent.clone()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "latitude"] => {
                self.defaults.latitude = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid latitude value: {}", value)))?;
            }
            ["defaults", "longitude"] => {
                self.defaults.longitude = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid longitude value: {}", value)))?;
            }
            ["defaults", "zoom"] => {
                self.defaults.zoom = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid zoom value: {}", value)))?;
            }
            ["defaults", "show_coordinates"] => {
                self.defaults.show_coordinates = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid boolean value: {}", value)))?;
            }
            ["defaults", "address_required"] => {
                self.defaults.address_required = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid boolean value: {}", value)))?;
            }
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["location", "default_here"] => {
                self.location.default_here = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid boolean value: {}", value)))?;
            }

            ["geocoder", "endpoint"] => {
                self.geocoder.endpoint = value.to_string();
            }
            ["geocoder", "accept_language"] => {
                self.geocoder.accept_language = value.to_string();
            }
            ["geocoder", "timeout_secs"] => {
                self.geocoder.timeout_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }
            ["geocoder", "user_agent"] => {
                self.geocoder.user_agent = value.to_string();
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.latitude",
            "defaults.longitude",
            "defaults.zoom",
            "defaults.show_coordinates",
            "defaults.address_required",
            "defaults.format",
            "server.host",
            "server.port",
            "location.default_here",
            "geocoder.endpoint",
            "geocoder.accept_language",
            "geocoder.timeout_secs",
            "geocoder.user_agent",
            "url.default",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self
            .url
            .providers
            .get(provider_name)
            .ok_or_else(|| Error::Config(format!("Unknown URL provider: {}", provider_name)))?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
