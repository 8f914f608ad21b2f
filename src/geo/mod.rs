//! Geocoding module
//!
//! Provides reverse geocoding (coordinates to address) and IP geolocation.

pub mod ip_location;
pub mod nominatim;

use crate::config::GeocoderConfig;
use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A single reverse-geocoded address candidate
///
/// The first element of a lookup's result sequence is the best match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Full formatted address line
    pub display_name: String,
    /// Position the geocoder resolved the address to
    pub coords: Coordinates,
    /// Structured components, when the backend provides them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<AddressDetails>,
}

/// Structured address components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    /// City, town, or village
    #[serde(alias = "town", alias = "village")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Trait for reverse-geocoding backends
pub trait Geocoder: Send + Sync {
    /// Reverse geocode coordinates to address candidates
    ///
    /// Returns at most `max_results` candidates, best match first. An empty
    /// vector means the backend found nothing at this position; transport
    /// and service failures are errors.
    fn reverse(
        &self,
        coords: Coordinates,
        max_results: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Address>>> + Send;
}

/// Get the default geocoding backend
pub fn get_geocoder(config: &GeocoderConfig) -> nominatim::NominatimGeocoder {
    nominatim::NominatimGeocoder::new(config)
}

/// Get the IP location service
pub fn get_ip_locator() -> ip_location::IpLocator {
    ip_location::IpLocator::new()
}
