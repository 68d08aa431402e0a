//! Session state record for one playground.
//!
//! [`Session`] owns the run phase, the output panel, the current
//! [`ExecutionResult`], the trace cursor and the last complexity report. It is
//! a synchronous state machine: the async side (dispatching the request and
//! awaiting the response) lives in the caller, which brackets the await with
//! [`Session::request_run`] / [`Session::confirm_inputs`] and
//! [`Session::settle`].
//!
//! Single-flight is a phase check, not a queue: while the phase is
//! [`RunPhase::Running`] every attempt to start another run fails with
//! [`SessionError::Busy`].

use serde::Serialize;

use crate::cursor::{Navigation, StepView, TraceCursor};
use crate::detect::{summarize, InputDetector};
use crate::error::{GateError, SessionError};
use crate::gate::{GateTransition, InputGate};
use crate::projector::ComplexityReport;
use crate::types::{ExecutionRequest, ExecutionResult, TraceStep};

/// Output panel text shown while a request is outstanding.
pub const RUNNING_TEXT: &str = "Running code...";

/// Output panel text after a transport or parse failure.
pub const TRANSPORT_FAILURE_TEXT: &str = "Server error. Check console.";

pub const LABEL_RUN: &str = "Run";
pub const LABEL_FILL_INPUTS: &str = "Fill Inputs";
pub const LABEL_RUNNING: &str = "Running...";

/// Where the session is in the run lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RunPhase {
    Idle,
    /// Waiting for the user to fill every input slot for `code`.
    CollectingInputs { code: String, gate: InputGate },
    /// `request` has been handed to the execution service.
    Running { request: ExecutionRequest },
}

/// State of the run control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunAction {
    pub label: &'static str,
    pub enabled: bool,
}

/// What the caller should do after [`Session::request_run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPlan {
    /// No inputs needed; send this request now.
    Dispatch(ExecutionRequest),
    /// Collect `count` values before the run can be confirmed.
    AwaitInputs { count: usize },
}

/// How an outstanding request settled.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The service answered with a parseable body (which may still carry a
    /// program-level error).
    Completed(ExecutionResult),
    /// The exchange failed; the message is diagnostic only and never shown.
    TransportFailed(String),
}

#[derive(Debug, Clone)]
pub struct Session {
    detector: InputDetector,
    phase: RunPhase,
    output: String,
    detection_note: Option<String>,
    result: Option<ExecutionResult>,
    cursor: TraceCursor,
    complexity: Option<ComplexityReport>,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(InputDetector::default())
    }
}

impl Session {
    pub fn new(detector: InputDetector) -> Self {
        Session {
            detector,
            phase: RunPhase::Idle,
            output: String::new(),
            detection_note: None,
            result: None,
            cursor: TraceCursor::Empty,
            complexity: None,
        }
    }

    pub fn phase(&self) -> &RunPhase {
        &self.phase
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, RunPhase::Running { .. })
    }

    /// Current output panel text.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Note on how many input slots the last detection pass found.
    pub fn detection_note(&self) -> Option<&str> {
        self.detection_note.as_deref()
    }

    pub fn result(&self) -> Option<&ExecutionResult> {
        self.result.as_ref()
    }

    pub fn trace(&self) -> &[TraceStep] {
        match &self.result {
            Some(result) => &result.trace,
            None => &[],
        }
    }

    pub fn cursor(&self) -> TraceCursor {
        self.cursor
    }

    pub fn complexity(&self) -> Option<&ComplexityReport> {
        self.complexity.as_ref()
    }

    /// The gate, while inputs are being collected.
    pub fn gate(&self) -> Option<&InputGate> {
        match &self.phase {
            RunPhase::CollectingInputs { gate, .. } => Some(gate),
            _ => None,
        }
    }

    /// The request currently outstanding, if any.
    pub fn in_flight(&self) -> Option<&ExecutionRequest> {
        match &self.phase {
            RunPhase::Running { request } => Some(request),
            _ => None,
        }
    }

    pub fn run_action(&self) -> RunAction {
        match &self.phase {
            RunPhase::Idle => RunAction {
                label: LABEL_RUN,
                enabled: true,
            },
            RunPhase::CollectingInputs { gate, .. } if gate.is_ready() => RunAction {
                label: LABEL_RUN,
                enabled: true,
            },
            RunPhase::CollectingInputs { .. } => RunAction {
                label: LABEL_FILL_INPUTS,
                enabled: false,
            },
            RunPhase::Running { .. } => RunAction {
                label: LABEL_RUNNING,
                enabled: false,
            },
        }
    }

    /// Starts a run of `code`.
    ///
    /// Runs a fresh detection pass. With no input slots the session moves
    /// straight to `Running` and the caller must dispatch the returned
    /// request. Otherwise a new gate replaces any previous one.
    pub fn request_run(&mut self, code: impl Into<String>) -> Result<RunPlan, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        let code = code.into();
        let slots = self.detector.detect(&code);
        self.detection_note = Some(summarize(&slots));

        if slots.is_empty() {
            let request = ExecutionRequest::new(code, Vec::new());
            self.begin(request.clone());
            return Ok(RunPlan::Dispatch(request));
        }

        let count = slots.len();
        self.phase = RunPhase::CollectingInputs {
            code,
            gate: InputGate::new(&slots),
        };
        Ok(RunPlan::AwaitInputs { count })
    }

    /// Edits one input slot.
    pub fn fill_input(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<GateTransition, SessionError> {
        match &mut self.phase {
            RunPhase::CollectingInputs { gate, .. } => Ok(gate.set(index, value)?),
            RunPhase::Running { .. } => Err(SessionError::Busy),
            RunPhase::Idle => Err(SessionError::NotCollecting),
        }
    }

    /// Tears down the gate and moves to `Running`.
    ///
    /// Fails without changing state when any slot is blank.
    pub fn confirm_inputs(&mut self) -> Result<ExecutionRequest, SessionError> {
        match &self.phase {
            RunPhase::CollectingInputs { gate, .. } if !gate.is_ready() => {
                return Err(SessionError::Gate(GateError::NotReady {
                    missing: gate.missing(),
                    count: gate.len(),
                }));
            }
            RunPhase::CollectingInputs { .. } => {}
            RunPhase::Running { .. } => return Err(SessionError::Busy),
            RunPhase::Idle => return Err(SessionError::NotCollecting),
        }

        if let RunPhase::CollectingInputs { code, gate } =
            std::mem::replace(&mut self.phase, RunPhase::Idle)
        {
            let request = ExecutionRequest::new(code, gate.into_values()?);
            self.begin(request.clone());
            return Ok(request);
        }
        Err(SessionError::NotCollecting)
    }

    fn begin(&mut self, request: ExecutionRequest) {
        self.phase = RunPhase::Running { request };
        self.output = RUNNING_TEXT.to_string();
    }

    /// Applies the settled outcome of the outstanding request and returns to
    /// `Idle`.
    ///
    /// A completed exchange replaces the result, trace cursor and complexity
    /// report in full, even when it carries a program error. A transport
    /// failure only changes the output panel.
    pub fn settle(&mut self, outcome: Outcome) -> Result<(), SessionError> {
        if !self.is_busy() {
            return Err(SessionError::NotRunning);
        }
        self.phase = RunPhase::Idle;

        match outcome {
            Outcome::Completed(result) => {
                self.output = match &result.error {
                    Some(err) => format!("Error:\n{}", err),
                    None => result.output.clone(),
                };
                self.cursor = TraceCursor::for_trace(&result.trace);
                self.complexity = Some(ComplexityReport::new(
                    &result.time_complexity,
                    result.execution_time,
                ));
                self.result = Some(result);
            }
            Outcome::TransportFailed(_) => {
                self.output = TRANSPORT_FAILURE_TEXT.to_string();
            }
        }
        Ok(())
    }

    /// Applies one cursor transition and renders the new step.
    pub fn navigate(&mut self, nav: Navigation) -> Option<StepView> {
        self.cursor.apply(nav);
        self.current_step()
    }

    /// Keyboard entry point; ignored when there is no trace or the key is
    /// not a navigation key.
    pub fn handle_key(&mut self, key: &str) -> Option<StepView> {
        if self.cursor.is_empty() {
            return None;
        }
        let nav = Navigation::from_key(key)?;
        self.navigate(nav)
    }

    pub fn current_step(&self) -> Option<StepView> {
        self.cursor.render(self.trace())
    }
}
