//! Centralized constants for the pindrop crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Picker defaults
pub mod picker {
    /// Default starting latitude when none is supplied (central London)
    pub const DEFAULT_LATITUDE: f64 = 51.5074;

    /// Default starting longitude when none is supplied
    pub const DEFAULT_LONGITUDE: f64 = -0.1278;

    /// Default map zoom level
    pub const DEFAULT_ZOOM: f32 = 14.0;

    /// Maximum address candidates requested per reverse lookup
    pub const MAX_ADDRESS_RESULTS: usize = 1;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";
}

/// Cache settings
pub mod cache {
    /// IP location cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: u64 = 3600;

    /// IP location cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "ip_location_cache.json";
}
