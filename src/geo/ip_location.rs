//! IP-based geolocation
//!
//! Uses ip-api.com to pick a starting map center when the caller does not
//! supply one. Results are cached on disk.

use crate::constants::api::IP_API_URL;
use crate::constants::cache::{IP_LOCATION_CACHE_FILE, IP_LOCATION_TTL_SECS};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

/// An approximate position derived from the caller's IP address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpLocation {
    pub coords: Coordinates,
    /// Human-readable place label ("City, Region, Country")
    pub label: String,
}

/// IP location service with caching
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    cache_path: Option<PathBuf>,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

/// Cached location data
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedLocation {
    location: IpLocation,
    timestamp: u64,
}

impl IpLocator {
    /// Create a new IP locator with default cache path
    pub fn new() -> Self {
        let cache_path = dirs::cache_dir().map(|p| p.join("pindrop").join(IP_LOCATION_CACHE_FILE));

        Self {
            client: reqwest::Client::new(),
            cache_path,
        }
    }

    /// Create an IP locator with a specific cache path
    pub fn with_cache_path(cache_path: PathBuf) -> Self {
        Self {
            client: reqwest::Client::new(),
            cache_path: Some(cache_path),
        }
    }

    /// Get the approximate current location based on IP address
    pub async fn locate(&self) -> Result<IpLocation> {
        if let Some(cached) = self.load_cache() {
            return Ok(cached);
        }

        let location = self.fetch_location().await?;
        self.save_cache(&location);

        Ok(location)
    }

    async fn fetch_location(&self) -> Result<IpLocation> {
        let response = self
            .client
            .get(IP_API_URL)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse IP location response: {}", e)))?;

        if data.status != "success" {
            return Err(Error::Geo("IP location lookup failed".to_string()));
        }

        let lat = data
            .lat
            .ok_or_else(|| Error::Geo("No latitude in response".to_string()))?;
        let lng = data
            .lon
            .ok_or_else(|| Error::Geo("No longitude in response".to_string()))?;

        let label = [data.city, data.region_name, data.country]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Ok(IpLocation {
            coords: Coordinates::new(lat, lng),
            label: if label.is_empty() {
                "Unknown Location".to_string()
            } else {
                label
            },
        })
    }

    /// Load cached location if still valid
    fn load_cache(&self) -> Option<IpLocation> {
        let cache_path = self.cache_path.as_ref()?;

        if !cache_path.exists() {
            return None;
        }

        let content = fs::read_to_string(cache_path).ok()?;
        let cached: CachedLocation = serde_json::from_str(&content).ok()?;

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        if now - cached.timestamp < IP_LOCATION_TTL_SECS {
            Some(cached.location)
        } else {
            None
        }
    }

    fn save_cache(&self, location: &IpLocation) {
        let Some(cache_path) = &self.cache_path else {
            return;
        };

        if let Some(parent) = cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let cached = CachedLocation {
            location: location.clone(),
            timestamp,
        };

        if let Ok(content) = serde_json::to_string_pretty(&cached) {
            let _ = fs::write(cache_path, content);
        }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cache_operations() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("test_cache.json");
        let locator = IpLocator::with_cache_path(cache_path.clone());

        // Initially no cache
        assert!(locator.load_cache().is_none());

        let location = IpLocation {
            coords: Coordinates::new(40.7128, -74.0060),
            label: "New York, New York, United States".to_string(),
        };
        locator.save_cache(&location);

        let loaded = locator.load_cache().unwrap();
        assert_eq!(loaded.coords, location.coords);
        assert_eq!(loaded.label, location.label);
    }

    #[test]
    fn test_expired_cache_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("test_cache.json");

        let cached = CachedLocation {
            location: IpLocation {
                coords: Coordinates::new(40.7128, -74.0060),
                label: "New York".to_string(),
            },
            timestamp: 0,
        };
        fs::write(&cache_path, serde_json::to_string(&cached).unwrap()).unwrap();

        let locator = IpLocator::with_cache_path(cache_path);
        assert!(locator.load_cache().is_none());
    }

    #[test]
    fn test_cached_location_serialization() {
        let cached = CachedLocation {
            location: IpLocation {
                coords: Coordinates::new(40.7128, -74.0060),
                label: "NYC".to_string(),
            },
            timestamp: 1704200000,
        };

        let json = serde_json::to_string(&cached).unwrap();
        let parsed: CachedLocation = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.location.coords.lat, 40.7128);
        assert_eq!(parsed.timestamp, 1704200000);
    }
}
