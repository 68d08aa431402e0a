//! Trace playback request/response types.

use serde::{Deserialize, Serialize};

use tracepad_core::{Session, StepView};

/// Current playback position.
#[derive(Debug, Clone, Serialize)]
pub struct TraceView {
    /// `false` when the last result carried no trace; navigation is then a
    /// no-op and no step counter is shown.
    pub available: bool,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<StepView>,
}

impl TraceView {
    pub fn from_session(session: &Session) -> Self {
        TraceView {
            available: !session.cursor().is_empty(),
            length: session.trace().len(),
            step: session.current_step(),
        }
    }
}

/// Keyboard shortcut forwarded by a front-end.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyRequest {
    /// Key name: `ArrowLeft`, `ArrowRight`, `Home` or `End`.
    pub key: String,
}
