//! pindrop: interactive map location picker
//!
//! A library and CLI tool for picking a location on a map: pan, settle on a
//! centered pin, reverse-geocode the pin into a human-readable address, and
//! confirm to get the chosen coordinates (and best-effort address) back.
//!
//! ## Features
//!
//! - Headless picker session driven by camera events
//! - Reverse geocoding via OpenStreetMap Nominatim
//! - Sequence-tagged background lookups (stale results never win)
//! - Web screen (Leaflet frontend + HTTP API) and terminal interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pindrop::geo::nominatim::NominatimGeocoder;
//! use pindrop::picker::{PickerEvent, PickerRequest, PickerSession, SharedPanel};
//! use pindrop::config::GeocoderConfig;
//! use pindrop::coord::Coordinates;
//! use tokio::sync::mpsc;
//!
//! # async fn demo() {
//! let geocoder = NominatimGeocoder::new(&GeocoderConfig::default());
//! let panel = SharedPanel::new();
//! let session = PickerSession::new(PickerRequest::default(), geocoder, panel.clone());
//!
//! let (events, rx) = mpsc::channel(16);
//! let running = tokio::spawn(session.run(rx));
//!
//! // The map surface feeds camera events; the user confirms
//! events.send(PickerEvent::CameraIdle { center: Coordinates::new(51.5034, -0.1276) }).await.unwrap();
//! events.send(PickerEvent::Confirm).await.unwrap();
//!
//! if let Some(result) = running.await.unwrap() {
//!     println!("Picked: {}, {}", result.latitude, result.longitude);
//! }
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod picker;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use geo::{Address, Geocoder};
pub use picker::{PickerEvent, PickerRequest, PickerResult, PickerSession};
