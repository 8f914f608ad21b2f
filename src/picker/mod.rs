//! Location picker
//!
//! The core of the crate: a headless picker session driven by camera events.
//! The map surface (whatever renders tiles and fires move/idle events) and
//! the results panel are collaborators; the session owns the screen state,
//! runs reverse-geocode lookups in the background, and produces at most one
//! [`PickerResult`] over its lifetime.

pub mod address;
pub mod panel;
pub mod session;
pub mod state;

use crate::constants::picker::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_ZOOM};
use crate::coord::Coordinates;
use crate::geo::Address;
use serde::{Deserialize, Serialize};

pub use panel::{PanelView, ResultsPanel, SharedPanel};
pub use session::PickerSession;
pub use state::ScreenState;

/// Immutable input supplied once at session creation
///
/// Missing fields fall back to the crate defaults, matching the behavior of
/// the inbound configuration contract: unset coordinates and zoom use fixed
/// constants, both flags default to true.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PickerRequest {
    #[serde(default = "default_latitude")]
    pub initial_latitude: f64,
    #[serde(default = "default_longitude")]
    pub initial_longitude: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f32,
    /// Whether the panel should display raw coordinates
    #[serde(default = "default_true")]
    pub show_coordinates: bool,
    /// Whether an address must be available before confirming
    #[serde(default = "default_true")]
    pub address_required: bool,
}

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

impl Default for PickerRequest {
    fn default() -> Self {
        Self {
            initial_latitude: default_latitude(),
            initial_longitude: default_longitude(),
            zoom: default_zoom(),
            show_coordinates: true,
            address_required: true,
        }
    }
}

impl PickerRequest {
    /// The starting map center
    pub fn initial_center(&self) -> Coordinates {
        Coordinates::new(self.initial_latitude, self.initial_longitude)
    }
}

/// The confirmed choice, produced at most once per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerResult {
    pub latitude: f64,
    pub longitude: f64,
    /// Address candidates from the last successful lookup, best match first;
    /// `None` when confirmation happened without an address
    pub addresses: Option<Vec<Address>>,
}

/// Events that drive a picker session
///
/// Camera events come from the map surface; confirm/cancel from the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PickerEvent {
    /// The user began dragging or zooming
    CameraMoveStarted,
    /// Panning/zooming stopped with the map centered at `center`
    CameraIdle { center: Coordinates },
    /// The user chose the current position
    Confirm,
    /// The user left without choosing
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = PickerRequest::default();
        assert!(request.show_coordinates);
        assert!(request.address_required);
        assert_eq!(request.zoom, DEFAULT_ZOOM);
        assert_eq!(request.initial_center().lat, DEFAULT_LATITUDE);
    }

    #[test]
    fn test_request_partial_json() {
        // Omitted fields fall back to defaults
        let request: PickerRequest =
            serde_json::from_str(r#"{"initial_latitude": 40.0, "address_required": false}"#)
                .unwrap();
        assert_eq!(request.initial_latitude, 40.0);
        assert_eq!(request.initial_longitude, DEFAULT_LONGITUDE);
        assert!(request.show_coordinates);
        assert!(!request.address_required);
    }

    #[test]
    fn test_request_empty_json() {
        let request: PickerRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.initial_latitude, DEFAULT_LATITUDE);
        assert_eq!(request.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn test_event_json_shape() {
        let event: PickerEvent = serde_json::from_str(
            r#"{"type": "camera_idle", "center": {"lat": 51.5, "lng": -0.12}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            PickerEvent::CameraIdle {
                center: Coordinates::new(51.5, -0.12)
            }
        );

        let confirm: PickerEvent = serde_json::from_str(r#"{"type": "confirm"}"#).unwrap();
        assert_eq!(confirm, PickerEvent::Confirm);
    }

    #[test]
    fn test_result_serialization() {
        let result = PickerResult {
            latitude: 51.5,
            longitude: -0.12,
            addresses: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        let parsed: PickerResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
