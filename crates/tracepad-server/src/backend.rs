//! Execution service client.
//!
//! [`ExecutionBackend`] is the seam between the controller and the remote
//! sandbox. [`HttpExecutionBackend`] is the production implementation: one
//! JSON POST per submission, no retries and no local timeout.

use async_trait::async_trait;

use tracepad_core::{ExecutionRequest, ExecutionResult};

/// Failures of the request/response exchange itself.
///
/// These are distinct from a program-level `error` field inside a successful
/// response, which arrives as an ordinary [`ExecutionResult`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or no response arrived.
    #[error("execution service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status.
    #[error("execution service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be read.
    #[error("execution response read failed: {0}")]
    Body(String),

    /// The response body is not a valid execution result.
    #[error("execution response parse failed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Something that can run code remotely.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, TransportError>;
}

/// Posts requests to an HTTP execution service.
#[derive(Debug, Clone)]
pub struct HttpExecutionBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpExecutionBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        HttpExecutionBackend {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ExecutionBackend for HttpExecutionBackend {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|err| TransportError::Body(err.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body_text,
            });
        }

        Ok(serde_json::from_str(&body_text)?)
    }
}
