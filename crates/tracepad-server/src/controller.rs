//! Execution session controller.
//!
//! [`ExecutionController`] wraps the core [`Session`] in an async mutex and
//! owns the single suspension point of the system: awaiting the execution
//! backend. The lock is never held across that await. Single-flight comes
//! from the session phase, so a second dispatch while one is outstanding is
//! rejected with [`SessionError::Busy`] instead of being queued.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use tracepad_core::{
    ExecutionRequest, GateTransition, Navigation, Outcome, RunPlan, Session, SessionError,
    StepView,
};

use crate::backend::ExecutionBackend;

/// Identifier of one dispatched request (UUID v4 newtype).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        RunId(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        RunId::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a settled run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Success,
    /// The sandbox reported an error in the program.
    ProgramError,
    /// The exchange with the execution service failed.
    TransportFailure,
}

/// Result of a run or input submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Inputs must be filled before the run can be submitted.
    AwaitingInputs { count: usize },
    /// A request was dispatched and has settled.
    Settled { run_id: RunId, outcome: RunOutcome },
}

/// Session plus the id of the last dispatched run.
#[derive(Debug, Default)]
pub struct ControllerState {
    pub session: Session,
    pub last_run_id: Option<RunId>,
}

/// Owns the session and drives requests through the backend.
#[derive(Clone)]
pub struct ExecutionController {
    state: Arc<Mutex<ControllerState>>,
    backend: Arc<dyn ExecutionBackend>,
}

impl ExecutionController {
    pub fn new(session: Session, backend: Arc<dyn ExecutionBackend>) -> Self {
        ExecutionController {
            state: Arc::new(Mutex::new(ControllerState {
                session,
                last_run_id: None,
            })),
            backend,
        }
    }

    /// Starts a run of `code`, dispatching immediately if no inputs are
    /// needed.
    pub async fn run(&self, code: String) -> Result<RunStatus, SessionError> {
        let (run_id, task) = {
            let mut state = self.state.lock().await;
            match state.session.request_run(code)? {
                RunPlan::Dispatch(request) => self.dispatch(&mut state, request),
                RunPlan::AwaitInputs { count } => {
                    tracing::info!(inputs = count, "waiting for run-time inputs");
                    return Ok(RunStatus::AwaitingInputs { count });
                }
            }
        };
        Ok(self.await_settled(run_id, task).await)
    }

    pub async fn fill_input(
        &self,
        index: usize,
        value: String,
    ) -> Result<GateTransition, SessionError> {
        let transition = self.state.lock().await.session.fill_input(index, value)?;
        if transition == GateTransition::BecameReady {
            tracing::debug!("all inputs filled; run unlocked");
        }
        Ok(transition)
    }

    /// Submits the collected inputs. Fails while any slot is blank.
    pub async fn submit_inputs(&self) -> Result<RunStatus, SessionError> {
        let (run_id, task) = {
            let mut state = self.state.lock().await;
            let request = state.session.confirm_inputs()?;
            self.dispatch(&mut state, request)
        };
        Ok(self.await_settled(run_id, task).await)
    }

    /// Spawns the exchange for `request`, which the session has just moved
    /// to `Running`.
    ///
    /// Must be called under the same lock guard as that phase change. Once
    /// spawned, the task settles the session even if the caller stops
    /// polling.
    fn dispatch(
        &self,
        state: &mut ControllerState,
        request: ExecutionRequest,
    ) -> (RunId, JoinHandle<RunOutcome>) {
        let run_id = RunId::new();
        state.last_run_id = Some(run_id);
        tracing::info!(%run_id, inputs = request.inputs.len(), "dispatching run");

        let shared = Arc::clone(&self.state);
        let backend = Arc::clone(&self.backend);
        let task = tokio::spawn(async move {
            let exchange = tokio::spawn(async move { backend.execute(&request).await });
            let outcome = match exchange.await {
                Ok(Ok(result)) => {
                    tracing::info!(
                        %run_id,
                        trace_len = result.trace.len(),
                        complexity = %result.time_complexity,
                        execution_time = result.execution_time,
                        program_error = result.is_program_error(),
                        "run settled"
                    );
                    Outcome::Completed(result)
                }
                Ok(Err(err)) => {
                    tracing::warn!(%run_id, error = %err, "run failed in transport");
                    Outcome::TransportFailed(err.to_string())
                }
                Err(err) => {
                    tracing::error!(%run_id, error = %err, "backend task aborted");
                    Outcome::TransportFailed(err.to_string())
                }
            };
            let kind = outcome_kind(&outcome);
            settle(&shared, outcome).await;
            kind
        });
        (run_id, task)
    }

    async fn await_settled(&self, run_id: RunId, task: JoinHandle<RunOutcome>) -> RunStatus {
        let outcome = match task.await {
            Ok(kind) => kind,
            Err(err) => {
                tracing::error!(%run_id, error = %err, "run task aborted");
                settle(&self.state, Outcome::TransportFailed(err.to_string())).await;
                RunOutcome::TransportFailure
            }
        };
        RunStatus::Settled { run_id, outcome }
    }

    pub async fn navigate(&self, nav: Navigation) -> Option<StepView> {
        self.state.lock().await.session.navigate(nav)
    }

    pub async fn handle_key(&self, key: &str) -> Option<StepView> {
        self.state.lock().await.session.handle_key(key)
    }

    /// Runs `f` against the current state under the lock.
    pub async fn read<R>(&self, f: impl FnOnce(&ControllerState) -> R) -> R {
        f(&*self.state.lock().await)
    }
}

fn outcome_kind(outcome: &Outcome) -> RunOutcome {
    match outcome {
        Outcome::Completed(result) if result.is_program_error() => RunOutcome::ProgramError,
        Outcome::Completed(_) => RunOutcome::Success,
        Outcome::TransportFailed(_) => RunOutcome::TransportFailure,
    }
}

async fn settle(state: &Mutex<ControllerState>, outcome: Outcome) {
    if let Err(err) = state.lock().await.session.settle(outcome) {
        tracing::warn!(error = %err, "settle ignored");
    }
}
