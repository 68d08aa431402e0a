//! Application state shared by all handlers.
//!
//! The controller already guards the session behind a `tokio::sync::Mutex`;
//! the editor buffer gets its own async mutex so editing never waits on
//! session reads.

use std::sync::Arc;

use axum::http::HeaderValue;
use tokio::sync::Mutex;

use tracepad_core::{FileError, Session, SourceBuffer, Workspace};

use crate::backend::{ExecutionBackend, HttpExecutionBackend};
use crate::config::ServerConfig;
use crate::controller::ExecutionController;

#[derive(Clone)]
pub struct AppState {
    /// Run lifecycle, trace cursor and complexity state.
    pub controller: ExecutionController,
    /// Source text the editor endpoints read and write.
    pub source: Arc<Mutex<SourceBuffer>>,
    /// Root that file import and export may not leave.
    pub workspace: Workspace,
    /// Browser origins granted CORS access; empty means same-origin only.
    pub allowed_origins: Vec<HeaderValue>,
}

impl AppState {
    /// Creates state that talks to the configured HTTP execution service.
    ///
    /// Fails when the workspace directory does not exist.
    pub fn new(config: &ServerConfig) -> Result<Self, FileError> {
        let workspace = Workspace::open(&config.workspace)?;
        let backend = Arc::new(HttpExecutionBackend::new(config.executor_url.clone()));
        Ok(Self::with_backend(backend, workspace)
            .with_allowed_origins(config.allowed_origins.clone()))
    }

    /// Creates state over any backend (used by tests).
    pub fn with_backend(backend: Arc<dyn ExecutionBackend>, workspace: Workspace) -> Self {
        AppState {
            controller: ExecutionController::new(Session::default(), backend),
            source: Arc::new(Mutex::new(SourceBuffer::default())),
            workspace,
            allowed_origins: Vec::new(),
        }
    }

    pub fn with_allowed_origins(mut self, origins: Vec<HeaderValue>) -> Self {
        self.allowed_origins = origins;
        self
    }
}
