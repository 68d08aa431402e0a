//! Binary entrypoint for the tracepad HTTP server.
//!
//! Configuration comes from environment variables; see
//! [`tracepad_server::config`].

use std::process;

use tracepad_server::config::ServerConfig;
use tracepad_server::router::build_router;
use tracepad_server::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            process::exit(2);
        }
    };

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!("workspace unavailable: {}", err);
            process::exit(2);
        }
    };
    tracing::info!(
        workspace = %state.workspace.root().display(),
        origins = state.allowed_origins.len(),
        "file access confined to workspace"
    );
    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind {}: {}", addr, err);
            process::exit(1);
        }
    };

    tracing::info!(
        executor = %config.executor_url,
        "tracepad server starting on {}",
        addr
    );

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", err);
        process::exit(1);
    }
}
