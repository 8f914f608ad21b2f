//! HTTP API routes
//!
//! The web rendition of the picker screen: the static frontend is the map
//! surface, these endpoints carry its camera events, the panel state, and
//! the confirmed result.

use crate::constants::picker::MAX_ADDRESS_RESULTS;
use crate::coord::Coordinates;
use crate::error::Error;
use crate::geo::{Address, Geocoder};
use crate::picker::panel::PanelModel;
use crate::picker::{PickerEvent, PickerRequest, PickerResult};
use crate::server::state::{AppState, SessionStatus, SessionOutcome};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use uuid::Uuid;

/// Create the API router
pub fn create_router<G>(state: Arc<AppState<G>>) -> Router
where
    G: Geocoder + Clone + 'static,
{
    // Determine static files path
    // Try relative to cwd first, then fallback to the executable's directory
    let static_path = if std::path::Path::new("static").exists() {
        "static".to_string()
    } else if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let path = exe_dir.join("static");
            if path.exists() {
                path.to_string_lossy().to_string()
            } else {
                "static".to_string()
            }
        } else {
            "static".to_string()
        }
    } else {
        "static".to_string()
    };

    Router::new()
        .route("/api/session", post(create_session_handler::<G>))
        .route("/api/session/:id", get(session_snapshot_handler::<G>))
        .route("/api/session/:id/event", post(session_event_handler::<G>))
        .route("/api/session/:id/result", get(session_result_handler::<G>))
        .route("/api/lookup", post(lookup_handler::<G>))
        .nest_service(
            "/",
            ServeDir::new(&static_path).append_index_html_on_directories(true),
        )
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Geocoding(_) => "GEOCODING_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

fn session_not_found(id: Uuid) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError {
            error: format!("Session not found: {}", id),
            code: "SESSION_NOT_FOUND".to_string(),
        }),
    )
}

/// Create session response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub id: Uuid,
    /// The effective request after defaults were applied
    pub request: PickerRequest,
}

/// Create a picker session
///
/// POST /api/session
///
/// The body is an optional partial request; omitted fields use defaults.
async fn create_session_handler<G>(
    State(state): State<Arc<AppState<G>>>,
    body: Option<Json<PickerRequest>>,
) -> Json<CreateSessionResponse>
where
    G: Geocoder + Clone + 'static,
{
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let id = state.create_session(request).await;
    Json(CreateSessionResponse { id, request })
}

/// Session snapshot: what the screen is showing
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub request: PickerRequest,
    pub status: SessionStatus,
    pub panel: PanelModel,
}

/// Get the current screen snapshot
///
/// GET /api/session/:id
async fn session_snapshot_handler<G>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, (StatusCode, Json<ApiError>)>
where
    G: Geocoder + Clone + 'static,
{
    let entry = state.session(&id).await.ok_or_else(|| session_not_found(id))?;

    Ok(Json(SessionSnapshot {
        request: entry.request,
        status: entry.outcome().status(),
        panel: entry.panel.snapshot(),
    }))
}

/// Forward a camera/user event into a session
///
/// POST /api/session/:id/event
async fn session_event_handler<G>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
    Json(event): Json<PickerEvent>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)>
where
    G: Geocoder + Clone + 'static,
{
    let entry = state.session(&id).await.ok_or_else(|| session_not_found(id))?;

    if entry.events.send(event).await.is_err() {
        // The session task has already returned
        return Err((
            StatusCode::GONE,
            Json(ApiError {
                error: format!("Session has ended: {}", id),
                code: "SESSION_ENDED".to_string(),
            }),
        ));
    }

    Ok(StatusCode::ACCEPTED)
}

/// Fetch the confirmed result
///
/// GET /api/session/:id/result
///
/// 404 PENDING while the session is still running, 410 CANCELLED if the
/// user left without confirming.
async fn session_result_handler<G>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PickerResult>, (StatusCode, Json<ApiError>)>
where
    G: Geocoder + Clone + 'static,
{
    let entry = state.session(&id).await.ok_or_else(|| session_not_found(id))?;

    match entry.outcome() {
        SessionOutcome::Confirmed(result) => Ok(Json(result)),
        SessionOutcome::Running => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: "No result yet".to_string(),
                code: "PENDING".to_string(),
            }),
        )),
        SessionOutcome::Cancelled => Err((
            StatusCode::GONE,
            Json(ApiError {
                error: "Session was cancelled".to_string(),
                code: "CANCELLED".to_string(),
            }),
        )),
    }
}

/// One-shot lookup request body
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub lat: f64,
    pub lng: f64,
}

/// One-shot lookup response
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub addresses: Vec<Address>,
}

/// Reverse geocode a position without a session
///
/// POST /api/lookup
async fn lookup_handler<G>(
    State(state): State<Arc<AppState<G>>>,
    Json(req): Json<LookupRequest>,
) -> Result<Json<LookupResponse>, ApiError>
where
    G: Geocoder + Clone + 'static,
{
    let coords = Coordinates::new(req.lat, req.lng);
    coords.validate().map_err(ApiError::from)?;

    let addresses = state
        .geocoder()
        .reverse(coords, MAX_ADDRESS_RESULTS)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(LookupResponse { addresses }))
}
