//! Picker session
//!
//! A session is a small actor: it owns the screen state and the panel, and
//! consumes camera/user events from a channel. Every camera-idle event
//! spawns one background reverse-geocode lookup; completions are handed back
//! to the session task, which is the only writer of state and panel.
//!
//! Lookups are tagged with a sequence number. If settle events fire faster
//! than lookups complete, completions for anything but the newest settle are
//! discarded, so a slow stale lookup can never overwrite a newer result.
//! Dropping the session (the run loop returning) aborts outstanding lookups.

use crate::constants::picker::MAX_ADDRESS_RESULTS;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::geo::{Address, Geocoder};
use crate::picker::panel::ResultsPanel;
use crate::picker::state::ScreenState;
use crate::picker::{PickerEvent, PickerRequest, PickerResult};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Notice shown when confirming while an address is required but absent
pub const NO_ADDRESS_NOTICE: &str = "No address found for this location yet";

/// Outcome of one background lookup, tagged with its settle sequence
struct LookupOutcome {
    seq: u64,
    addresses: Result<Vec<Address>>,
}

/// A single picker screen lifetime
pub struct PickerSession<G, P> {
    request: PickerRequest,
    state: ScreenState,
    geocoder: G,
    panel: P,
    lookups: JoinSet<LookupOutcome>,
    lookup_seq: u64,
}

impl<G, P> PickerSession<G, P>
where
    G: Geocoder + Clone + 'static,
    P: ResultsPanel,
{
    /// Create a session centered on the request's starting location
    pub fn new(request: PickerRequest, geocoder: G, panel: P) -> Self {
        Self {
            state: ScreenState::new(request.initial_center()),
            request,
            geocoder,
            panel,
            lookups: JoinSet::new(),
            lookup_seq: 0,
        }
    }

    /// The request this session was created with
    pub fn request(&self) -> &PickerRequest {
        &self.request
    }

    /// Drive the session to completion
    ///
    /// Returns `Some` with the confirmed result, or `None` if the session
    /// was cancelled (explicitly or by the event channel closing). Consuming
    /// `self` guarantees at most one result per session and aborts in-flight
    /// lookups on the way out.
    pub async fn run(mut self, mut events: mpsc::Receiver<PickerEvent>) -> Option<PickerResult> {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(PickerEvent::CameraMoveStarted) => self.on_camera_move_started(),
                    Some(PickerEvent::CameraIdle { center }) => self.on_camera_idle(center),
                    Some(PickerEvent::Confirm) => {
                        if let Some(result) = self.on_confirm() {
                            debug!(lat = result.latitude, lng = result.longitude, "location confirmed");
                            return Some(result);
                        }
                    }
                    Some(PickerEvent::Cancel) | None => {
                        debug!("picker session cancelled");
                        return None;
                    }
                },
                Some(joined) = self.lookups.join_next() => match joined {
                    Ok(outcome) => self.on_lookup_complete(outcome),
                    // Aborted tasks never reach here (only drop aborts them);
                    // a panicked lookup is treated like a failed one.
                    Err(e) => warn!(error = %e, "lookup task failed"),
                },
            }
        }
    }

    /// The user started dragging: hide stale details
    fn on_camera_move_started(&mut self) {
        if self.panel.is_showing() {
            self.panel.dismiss();
        }
    }

    /// Panning settled: capture the center and kick off a lookup
    fn on_camera_idle(&mut self, center: Coordinates) {
        self.panel.show_loading();
        self.state.center = center;

        self.lookup_seq += 1;
        let seq = self.lookup_seq;
        let geocoder = self.geocoder.clone();
        self.lookups.spawn(async move {
            let addresses = geocoder.reverse(center, MAX_ADDRESS_RESULTS).await;
            LookupOutcome { seq, addresses }
        });
    }

    /// A background lookup finished; apply it if it is still the newest
    fn on_lookup_complete(&mut self, outcome: LookupOutcome) {
        if outcome.seq != self.lookup_seq {
            debug!(seq = outcome.seq, latest = self.lookup_seq, "discarding stale lookup");
            return;
        }

        match outcome.addresses {
            Ok(addresses) => self.state.apply_addresses(addresses),
            Err(e) => {
                // Lookup failures degrade to an empty address, never an error
                warn!(error = %e, "reverse geocode failed");
                self.state.clear_addresses();
            }
        }

        self.panel.set_details(
            self.state.center.lat,
            self.state.center.lng,
            &self.state.short_address,
            &self.state.full_address,
        );
    }

    /// Apply the confirm rules; `None` keeps the session open
    fn on_confirm(&mut self) -> Option<PickerResult> {
        if self.state.current_addresses.is_some() {
            Some(PickerResult {
                latitude: self.state.center.lat,
                longitude: self.state.center.lng,
                addresses: self.state.current_addresses.clone(),
            })
        } else if !self.request.address_required {
            Some(PickerResult {
                latitude: self.state.center.lat,
                longitude: self.state.center.lng,
                addresses: None,
            })
        } else {
            self.panel.show_notice(NO_ADDRESS_NOTICE);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::picker::panel::{PanelView, SharedPanel};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time::sleep;

    /// One scripted lookup: an artificial delay plus a canned outcome
    struct ScriptedLookup {
        delay: Duration,
        outcome: std::result::Result<Vec<Address>, String>,
    }

    /// Geocoder that replays scripted lookups in order
    #[derive(Clone)]
    struct ScriptedGeocoder {
        script: Arc<Mutex<VecDeque<ScriptedLookup>>>,
    }

    impl ScriptedGeocoder {
        fn new(script: Vec<ScriptedLookup>) -> Self {
            Self {
                script: Arc::new(Mutex::new(script.into())),
            }
        }

        fn ok(addresses: Vec<Address>) -> ScriptedLookup {
            ScriptedLookup {
                delay: Duration::ZERO,
                outcome: Ok(addresses),
            }
        }

        fn ok_after(delay: Duration, addresses: Vec<Address>) -> ScriptedLookup {
            ScriptedLookup {
                delay,
                outcome: Ok(addresses),
            }
        }

        fn fail() -> ScriptedLookup {
            ScriptedLookup {
                delay: Duration::ZERO,
                outcome: Err("simulated timeout".to_string()),
            }
        }
    }

    impl Geocoder for ScriptedGeocoder {
        async fn reverse(&self, _coords: Coordinates, _max_results: usize) -> Result<Vec<Address>> {
            let lookup = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted");
            sleep(lookup.delay).await;
            lookup.outcome.map_err(Error::Geocoding)
        }
    }

    fn address(display_name: &str) -> Address {
        Address {
            display_name: display_name.to_string(),
            coords: Coordinates::new(39.78, -89.65),
            details: None,
        }
    }

    fn request(address_required: bool) -> PickerRequest {
        PickerRequest {
            address_required,
            ..PickerRequest::default()
        }
    }

    async fn wait_for_details(panel: &SharedPanel) -> PanelView {
        for _ in 0..100 {
            let view = panel.snapshot().view;
            if matches!(view, PanelView::Details { .. }) {
                return view;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("panel never reached details state");
    }

    #[tokio::test]
    async fn test_confirm_with_address() {
        let geocoder =
            ScriptedGeocoder::new(vec![ScriptedGeocoder::ok(vec![address(
                "123 Main St, Springfield, IL, USA",
            )])]);
        let panel = SharedPanel::new();
        let observer = panel.clone();
        let session = PickerSession::new(request(true), geocoder, panel);

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session.run(rx));

        let settled = Coordinates::new(39.7817, -89.6501);
        tx.send(PickerEvent::CameraIdle { center: settled }).await.unwrap();

        let view = wait_for_details(&observer).await;
        match view {
            PanelView::Details { short_address, .. } => {
                assert_eq!(short_address, "Springfield,IL")
            }
            other => panic!("unexpected view: {:?}", other),
        }

        tx.send(PickerEvent::Confirm).await.unwrap();
        let result = handle.await.unwrap().expect("confirm should emit a result");

        assert_eq!(result.latitude, settled.lat);
        assert_eq!(result.longitude, settled.lng);
        let addresses = result.addresses.unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].display_name, "123 Main St, Springfield, IL, USA");
    }

    #[tokio::test]
    async fn test_confirm_without_address_when_not_required() {
        let geocoder = ScriptedGeocoder::new(vec![ScriptedGeocoder::ok(Vec::new())]);
        let panel = SharedPanel::new();
        let observer = panel.clone();
        let session = PickerSession::new(request(false), geocoder, panel);

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session.run(rx));

        let settled = Coordinates::new(0.0, 0.0);
        tx.send(PickerEvent::CameraIdle { center: settled }).await.unwrap();
        wait_for_details(&observer).await;

        tx.send(PickerEvent::Confirm).await.unwrap();
        let result = handle.await.unwrap().unwrap();

        assert_eq!(result.latitude, 0.0);
        assert!(result.addresses.is_none());
    }

    #[tokio::test]
    async fn test_confirm_blocked_when_address_required() {
        let geocoder = ScriptedGeocoder::new(vec![ScriptedGeocoder::fail()]);
        let panel = SharedPanel::new();
        let observer = panel.clone();
        let session = PickerSession::new(request(true), geocoder, panel);

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session.run(rx));

        tx.send(PickerEvent::CameraIdle {
            center: Coordinates::new(51.5, -0.12),
        })
        .await
        .unwrap();
        wait_for_details(&observer).await;

        // Lookup failed, so confirming must not end the session
        tx.send(PickerEvent::Confirm).await.unwrap();
        for _ in 0..100 {
            if observer.snapshot().notice.is_some() {
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(observer.snapshot().notice.as_deref(), Some(NO_ADDRESS_NOTICE));
        assert!(!handle.is_finished());

        tx.send(PickerEvent::Cancel).await.unwrap();
        assert!(handle.await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_lookup_discarded() {
        // First settle's lookup is slow; second settles before it lands
        let geocoder = ScriptedGeocoder::new(vec![
            ScriptedGeocoder::ok_after(
                Duration::from_millis(500),
                vec![address("Old Road, Oldtown, OT, USA")],
            ),
            ScriptedGeocoder::ok_after(
                Duration::from_millis(50),
                vec![address("New Road, Newtown, NT, USA")],
            ),
        ]);
        let panel = SharedPanel::new();
        let observer = panel.clone();
        let session = PickerSession::new(request(true), geocoder, panel);

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session.run(rx));

        tx.send(PickerEvent::CameraIdle {
            center: Coordinates::new(1.0, 1.0),
        })
        .await
        .unwrap();
        tx.send(PickerEvent::CameraIdle {
            center: Coordinates::new(2.0, 2.0),
        })
        .await
        .unwrap();

        // Let both lookups complete (paused time auto-advances)
        sleep(Duration::from_secs(1)).await;

        match observer.snapshot().view {
            PanelView::Details {
                latitude,
                short_address,
                ..
            } => {
                assert_eq!(latitude, 2.0);
                assert_eq!(short_address, "Newtown,NT");
            }
            other => panic!("unexpected view: {:?}", other),
        }

        // The confirmed addresses are the newest lookup's, not the stale one's
        tx.send(PickerEvent::Confirm).await.unwrap();
        let result = handle.await.unwrap().unwrap();
        assert_eq!(
            result.addresses.unwrap()[0].display_name,
            "New Road, Newtown, NT, USA"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_lookup() {
        let geocoder = ScriptedGeocoder::new(vec![ScriptedGeocoder::ok_after(
            Duration::from_secs(30),
            vec![address("Too Late, Nowhere, NW, USA")],
        )]);
        let panel = SharedPanel::new();
        let observer = panel.clone();
        let session = PickerSession::new(request(true), geocoder, panel);

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session.run(rx));

        tx.send(PickerEvent::CameraIdle {
            center: Coordinates::new(51.5, -0.12),
        })
        .await
        .unwrap();
        sleep(Duration::from_millis(50)).await;
        assert_eq!(observer.snapshot().view, PanelView::Loading);

        tx.send(PickerEvent::Cancel).await.unwrap();
        assert!(handle.await.unwrap().is_none());

        // The in-flight lookup was aborted with the session; nothing may
        // touch the panel afterwards
        sleep(Duration::from_secs(60)).await;
        assert_eq!(observer.snapshot().view, PanelView::Loading);
    }

    #[tokio::test]
    async fn test_move_started_dismisses_panel() {
        let geocoder =
            ScriptedGeocoder::new(vec![ScriptedGeocoder::ok(vec![address("A, B, C, D")])]);
        let panel = SharedPanel::new();
        let observer = panel.clone();
        let session = PickerSession::new(request(true), geocoder, panel);

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session.run(rx));

        tx.send(PickerEvent::CameraIdle {
            center: Coordinates::new(1.0, 1.0),
        })
        .await
        .unwrap();
        wait_for_details(&observer).await;

        tx.send(PickerEvent::CameraMoveStarted).await.unwrap();
        for _ in 0..100 {
            if !observer.snapshot().view.is_showing() {
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(observer.snapshot().view, PanelView::Hidden);

        drop(tx);
        assert!(handle.await.unwrap().is_none());
    }
}
