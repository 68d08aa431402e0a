//! Session and run handlers.

use axum::extract::State;
use axum::Json;

use tracepad_core::Editor;

use crate::error::ApiError;
use crate::schema::session::{RunRequest, SessionView};
use crate::state::AppState;

/// Returns the full session view.
///
/// `GET /session`
pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.controller.read(SessionView::from_state).await)
}

/// Runs code, or opens the input step if the code reads run-time values.
///
/// Responds once the request has settled. While it is outstanding, any
/// other run or input submission gets `409 Conflict`.
///
/// `POST /run`
pub async fn run(
    State(state): State<AppState>,
    Json(req): Json<RunRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let code = match req.code {
        Some(code) => code,
        None => state.source.lock().await.value(),
    };

    state.controller.run(code).await?;
    Ok(Json(state.controller.read(SessionView::from_state).await))
}
