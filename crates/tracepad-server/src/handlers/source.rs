//! Editor buffer and file import/export handlers.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use tracepad_core::files::DEFAULT_EXPORT_NAME;
use tracepad_core::{CursorPlacement, Editor};

use crate::error::ApiError;
use crate::schema::source::{
    ExportRequest, ExportResponse, ImportRequest, ImportResponse, SourceView,
};
use crate::state::AppState;

/// `GET /source`
pub async fn get_source(State(state): State<AppState>) -> Json<SourceView> {
    Json(SourceView {
        code: state.source.lock().await.value(),
    })
}

/// Replaces the buffer contents.
///
/// `PUT /source`
pub async fn put_source(
    State(state): State<AppState>,
    Json(req): Json<SourceView>,
) -> Json<SourceView> {
    let mut source = state.source.lock().await;
    source.set_value(&req.code, CursorPlacement::End);
    Json(SourceView {
        code: source.value(),
    })
}

/// Returns the buffer as a downloadable `code.py`.
///
/// `GET /source/download`
pub async fn download(State(state): State<AppState>) -> impl IntoResponse {
    let code = state.source.lock().await.value();
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DEFAULT_EXPORT_NAME),
            ),
        ],
        code,
    )
}

/// Writes the buffer to `dir/code.py` inside the workspace.
///
/// `POST /source/export`
pub async fn export(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, ApiError> {
    let source = state.source.lock().await;
    let path = state.workspace.export(&*source, &req.dir)?;
    tracing::info!(path = %path.display(), "source exported");
    Ok(Json(ExportResponse { path }))
}

/// Loads a `.py`/`.txt` file from the workspace into the buffer.
///
/// `POST /source/import`
pub async fn import(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, ApiError> {
    let mut source = state.source.lock().await;
    let ack = state.workspace.import(&mut *source, &req.path)?;
    tracing::info!(path = %req.path.display(), "source imported");
    Ok(Json(ImportResponse {
        message: ack.to_string(),
    }))
}
