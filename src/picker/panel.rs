//! Results panel collaborator
//!
//! The panel is the bottom-of-screen widget showing loading/address state.
//! The session talks to it through the [`ResultsPanel`] trait; frontends
//! decide how to present it (a terminal printout, a shared model polled by
//! the web page).

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Presentation surface for the picker session
pub trait ResultsPanel: Send {
    /// Switch to the loading state while a lookup is in flight
    fn show_loading(&mut self);

    /// Show the settled position and its resolved address (empty strings
    /// when no address is available)
    fn set_details(&mut self, lat: f64, lng: f64, short_address: &str, full_address: &str);

    /// Hide the panel
    fn dismiss(&mut self);

    /// Whether the panel is currently visible
    fn is_showing(&self) -> bool;

    /// Show a transient notice (e.g. confirming without a required address)
    fn show_notice(&mut self, text: &str);
}

/// Serializable snapshot of what the panel is displaying
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelView {
    #[default]
    Hidden,
    Loading,
    Details {
        latitude: f64,
        longitude: f64,
        short_address: String,
        full_address: String,
    },
}

impl PanelView {
    pub fn is_showing(&self) -> bool {
        !matches!(self, PanelView::Hidden)
    }
}

/// Full panel model: the view plus a pending transient notice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelModel {
    #[serde(flatten)]
    pub view: PanelView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// A panel backed by shared state, for frontends that poll
///
/// The session holds one handle and mutates it; routes hold clones and read
/// snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedPanel {
    inner: Arc<Mutex<PanelModel>>,
}

impl SharedPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current panel model
    pub fn snapshot(&self) -> PanelModel {
        self.inner.lock().expect("panel lock poisoned").clone()
    }

    fn with<R>(&self, f: impl FnOnce(&mut PanelModel) -> R) -> R {
        let mut model = self.inner.lock().expect("panel lock poisoned");
        f(&mut model)
    }
}

impl ResultsPanel for SharedPanel {
    fn show_loading(&mut self) {
        self.with(|m| {
            m.view = PanelView::Loading;
            m.notice = None;
        });
    }

    fn set_details(&mut self, lat: f64, lng: f64, short_address: &str, full_address: &str) {
        self.with(|m| {
            m.view = PanelView::Details {
                latitude: lat,
                longitude: lng,
                short_address: short_address.to_string(),
                full_address: full_address.to_string(),
            };
            m.notice = None;
        });
    }

    fn dismiss(&mut self) {
        self.with(|m| {
            m.view = PanelView::Hidden;
            m.notice = None;
        });
    }

    fn is_showing(&self) -> bool {
        self.with(|m| m.view.is_showing())
    }

    fn show_notice(&mut self, text: &str) {
        self.with(|m| m.notice = Some(text.to_string()));
    }
}
