//! Input collection handlers.

use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::schema::session::{FillInputRequest, GateView, SessionView};
use crate::state::AppState;

/// Sets the value of one input slot.
///
/// `PUT /inputs/{index}`
pub async fn fill_input(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<FillInputRequest>,
) -> Result<Json<GateView>, ApiError> {
    let transition = state.controller.fill_input(index, req.value).await?;

    let view = state
        .controller
        .read(|s| GateView::from_session(&s.session))
        .await
        .ok_or_else(|| ApiError::Conflict("input collection ended".to_string()))?;

    Ok(Json(GateView {
        transition: Some(transition),
        ..view
    }))
}

/// Submits the collected inputs and runs the pending code.
///
/// `POST /inputs/submit`
pub async fn submit_inputs(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, ApiError> {
    state.controller.submit_inputs().await?;
    Ok(Json(state.controller.read(SessionView::from_state).await))
}
