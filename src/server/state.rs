//! Server shared state
//!
//! Holds configuration, the geocoding backend, and the registry of live
//! picker sessions.

use crate::config::Config;
use crate::geo::Geocoder;
use crate::picker::panel::SharedPanel;
use crate::picker::{PickerEvent, PickerRequest, PickerResult, PickerSession};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

/// Terminal status of a picker session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Running,
    Confirmed,
    Cancelled,
}

/// What a session ended with (or that it has not ended yet)
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    Running,
    Confirmed(PickerResult),
    Cancelled,
}

impl SessionOutcome {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionOutcome::Running => SessionStatus::Running,
            SessionOutcome::Confirmed(_) => SessionStatus::Confirmed,
            SessionOutcome::Cancelled => SessionStatus::Cancelled,
        }
    }
}

/// Handle to one picker screen, shared between the session task and routes
#[derive(Clone)]
pub struct SessionEntry {
    pub request: PickerRequest,
    pub events: mpsc::Sender<PickerEvent>,
    pub panel: SharedPanel,
    outcome: Arc<StdMutex<SessionOutcome>>,
}

impl SessionEntry {
    pub fn outcome(&self) -> SessionOutcome {
        self.outcome.lock().expect("outcome lock poisoned").clone()
    }
}

/// Shared state for the HTTP server
pub struct AppState<G> {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// Reverse-geocoding backend handed to every session
    geocoder: G,

    /// Live and finished picker sessions
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

impl<G> AppState<G>
where
    G: Geocoder + Clone + 'static,
{
    /// Create new application state
    pub fn new(config: Config, geocoder: G) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            geocoder,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// The geocoding backend
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Spawn a new picker session and register it
    pub async fn create_session(&self, request: PickerRequest) -> Uuid {
        let id = Uuid::new_v4();
        let (events, rx) = mpsc::channel(16);
        let panel = SharedPanel::new();
        let outcome = Arc::new(StdMutex::new(SessionOutcome::Running));

        let session = PickerSession::new(request, self.geocoder.clone(), panel.clone());
        let slot = Arc::clone(&outcome);
        tokio::spawn(async move {
            let result = session.run(rx).await;
            let mut outcome = slot.lock().expect("outcome lock poisoned");
            *outcome = match result {
                Some(result) => SessionOutcome::Confirmed(result),
                None => SessionOutcome::Cancelled,
            };
        });

        info!(%id, "picker session created");
        self.sessions.lock().await.insert(
            id,
            SessionEntry {
                request,
                events,
                panel,
                outcome,
            },
        );
        id
    }

    /// Look up a session by id
    pub async fn session(&self, id: &Uuid) -> Option<SessionEntry> {
        self.sessions.lock().await.get(id).cloned()
    }
}
