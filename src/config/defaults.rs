//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default output format for a confirmed pick
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Default geocoder accept-language
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en";

/// Default reverse-geocode request timeout in seconds
pub const DEFAULT_GEOCODER_TIMEOUT_SECS: u64 = 10;

/// User-Agent sent to the geocoding API (Nominatim requires one)
pub const DEFAULT_USER_AGENT: &str = concat!("pindrop/", env!("CARGO_PKG_VERSION"));

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "pindrop";
