//! Pane resize handler.

use axum::Json;

use tracepad_core::PaneWidths;

use crate::error::ApiError;
use crate::schema::layout::ResizeRequest;

/// `POST /layout/resize`
pub async fn resize(Json(req): Json<ResizeRequest>) -> Result<Json<PaneWidths>, ApiError> {
    if !req.viewport_width.is_finite() || req.viewport_width <= 0.0 {
        return Err(ApiError::BadRequest(
            "viewport_width must be a positive number".to_string(),
        ));
    }
    Ok(Json(PaneWidths::from_pointer(req.pointer_x, req.viewport_width)))
}
