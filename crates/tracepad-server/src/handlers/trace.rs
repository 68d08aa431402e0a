//! Trace playback handlers.

use axum::extract::{Path, State};
use axum::Json;

use tracepad_core::Navigation;

use crate::error::ApiError;
use crate::schema::trace::{KeyRequest, TraceView};
use crate::state::AppState;

/// Returns the step at the cursor.
///
/// `GET /trace`
pub async fn get_trace(State(state): State<AppState>) -> Json<TraceView> {
    Json(state.controller.read(|s| TraceView::from_session(&s.session)).await)
}

/// Applies one navigation control (`start`, `back`, `forward`, `end`).
///
/// `POST /trace/{action}`
pub async fn navigate(
    State(state): State<AppState>,
    Path(action): Path<String>,
) -> Result<Json<TraceView>, ApiError> {
    let nav = Navigation::from_control(&action)
        .ok_or_else(|| ApiError::NotFound(format!("unknown trace action '{}'", action)))?;

    state.controller.navigate(nav).await;
    Ok(get_trace(State(state)).await)
}

/// Forwards a keyboard shortcut. Non-navigation keys are ignored.
///
/// `POST /trace/key`
pub async fn key(
    State(state): State<AppState>,
    Json(req): Json<KeyRequest>,
) -> Json<TraceView> {
    state.controller.handle_key(&req.key).await;
    get_trace(State(state)).await
}
