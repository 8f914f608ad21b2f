//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for reverse geocoding.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)

use crate::config::GeocoderConfig;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{Address, AddressDetails, Geocoder};
use serde::Deserialize;
use std::time::Duration;

/// Nominatim reverse-geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    endpoint: String,
    accept_language: String,
}

/// Nominatim reverse response
///
/// Some deployments report "nothing here" as HTTP 200 with an `error` field
/// instead of a 404, so both shapes are handled.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lon: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: Option<AddressDetails>,
}

impl NominatimGeocoder {
    /// Create a new Nominatim backend from geocoder settings
    pub fn new(config: &GeocoderConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            accept_language: config.accept_language.clone(),
        }
    }

    fn reverse_url(&self, coords: Coordinates) -> String {
        format!(
            "{}/reverse?lat={}&lon={}&format=json&addressdetails=1&accept-language={}",
            self.endpoint,
            coords.lat,
            coords.lng,
            urlencoding::encode(&self.accept_language)
        )
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> Result<(f64, f64)> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Geocoding(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Geocoding(format!("Invalid longitude: {}", lng)))?;
        Ok((lat, lng))
    }

    /// Convert a raw response into an address, if it holds one
    fn into_address(result: NominatimResult) -> Result<Option<Address>> {
        if result.error.is_some() {
            return Ok(None);
        }

        let (Some(lat), Some(lon), Some(display_name)) =
            (result.lat, result.lon, result.display_name)
        else {
            return Err(Error::Geocoding(
                "Nominatim response missing required fields".to_string(),
            ));
        };

        let (lat, lng) = Self::parse_coords(&lat, &lon)?;
        Ok(Some(Address {
            display_name,
            coords: Coordinates::new(lat, lng),
            details: result.address,
        }))
    }
}

impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, coords: Coordinates, max_results: usize) -> Result<Vec<Address>> {
        let url = self.reverse_url(coords);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            // Nominatim answers 404 where there is no address at all
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Ok(Vec::new());
            }
            return Err(Error::Geocoding(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let result: NominatimResult = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        let addresses = Self::into_address(result)?
            .into_iter()
            .take(max_results)
            .collect();
        Ok(addresses)
    }
}
