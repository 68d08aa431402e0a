//! Router assembly for the tracepad HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax. The static `/trace/key`
/// route takes precedence over `/trace/{action}`.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(state.allowed_origins.clone());
    Router::new()
        // Run lifecycle
        .route("/session", get(handlers::run::get_session))
        .route("/run", post(handlers::run::run))
        // Input collection
        .route("/inputs/submit", post(handlers::inputs::submit_inputs))
        .route("/inputs/{index}", put(handlers::inputs::fill_input))
        // Trace playback
        .route("/trace", get(handlers::trace::get_trace))
        .route("/trace/key", post(handlers::trace::key))
        .route("/trace/{action}", post(handlers::trace::navigate))
        // Complexity
        .route("/complexity", get(handlers::complexity::get_complexity))
        .route("/complexity/project", post(handlers::complexity::project))
        // Editor buffer and files
        .route(
            "/source",
            get(handlers::source::get_source).put(handlers::source::put_source),
        )
        .route("/source/download", get(handlers::source::download))
        .route("/source/export", post(handlers::source::export))
        .route("/source/import", post(handlers::source::import))
        // Layout
        .route("/layout/resize", post(handlers::layout::resize))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Grants cross-origin access to `origins` only. With none configured no
/// `Access-Control-Allow-Origin` header is ever sent, so browsers keep
/// other sites away from the file and run endpoints.
fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
}
