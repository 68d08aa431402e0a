//! Run lifecycle request/response types.

use serde::{Deserialize, Serialize};

use tracepad_core::{ComplexityReport, GateTransition, InputSlot, RunAction, RunPhase, Session};

use super::trace::TraceView;
use crate::controller::{ControllerState, RunId};

/// Request to run source code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunRequest {
    /// Source to run; the editor buffer is used when omitted.
    #[serde(default)]
    pub code: Option<String>,
}

/// New value for one input slot.
#[derive(Debug, Clone, Deserialize)]
pub struct FillInputRequest {
    pub value: String,
}

/// Input collection state.
#[derive(Debug, Clone, Serialize)]
pub struct GateView {
    pub ready: bool,
    pub slots: Vec<InputSlot>,
    pub run_action: RunAction,
    /// Only present in responses to a slot edit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<GateTransition>,
}

impl GateView {
    pub fn from_session(session: &Session) -> Option<Self> {
        let gate = session.gate()?;
        Some(GateView {
            ready: gate.is_ready(),
            slots: gate.slots().to_vec(),
            run_action: session.run_action(),
            transition: None,
        })
    }
}

/// Everything the playground displays.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// `idle`, `collecting_inputs` or `running`.
    pub phase: &'static str,
    pub run_action: RunAction,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<GateView>,
    pub trace: TraceView,
    pub complexity: Option<ComplexityReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run_id: Option<RunId>,
}

impl SessionView {
    pub fn from_state(state: &ControllerState) -> Self {
        let session = &state.session;
        let phase = match session.phase() {
            RunPhase::Idle => "idle",
            RunPhase::CollectingInputs { .. } => "collecting_inputs",
            RunPhase::Running { .. } => "running",
        };
        SessionView {
            phase,
            run_action: session.run_action(),
            output: session.output().to_string(),
            detection_note: session.detection_note().map(str::to_string),
            inputs: GateView::from_session(session),
            trace: TraceView::from_session(session),
            complexity: session.complexity().cloned(),
            last_run_id: state.last_run_id,
        }
    }
}
