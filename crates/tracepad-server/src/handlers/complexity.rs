//! Complexity projection handlers.

use axum::extract::State;
use axum::Json;

use tracepad_core::ComplexityReport;

use crate::error::ApiError;
use crate::schema::complexity::ProjectRequest;
use crate::state::AppState;

/// Returns the report for the last completed run, or `null`.
///
/// `GET /complexity`
pub async fn get_complexity(State(state): State<AppState>) -> Json<Option<ComplexityReport>> {
    Json(state.controller.read(|s| s.session.complexity().cloned()).await)
}

/// Projects an arbitrary measurement without touching the session.
///
/// `POST /complexity/project`
pub async fn project(Json(req): Json<ProjectRequest>) -> Result<Json<ComplexityReport>, ApiError> {
    if !req.execution_time.is_finite() || req.execution_time < 0.0 {
        return Err(ApiError::BadRequest(format!(
            "execution_time must be a non-negative number, got {}",
            req.execution_time
        )));
    }
    Ok(Json(ComplexityReport::new(&req.label, req.execution_time)))
}
