//! Core data model and state machines for the tracepad code playground.
//!
//! This crate has no I/O beyond local file import/export. The asynchronous
//! request lifecycle lives in `tracepad-server`; everything here is a plain
//! state transition that can be exercised without a runtime or a rendering
//! surface.

pub mod chart;
pub mod cursor;
pub mod detect;
pub mod editor;
pub mod error;
pub mod files;
pub mod gate;
pub mod layout;
pub mod projector;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use chart::{ChartHost, ChartSlot};
pub use cursor::{Navigation, StepView, TraceCursor};
pub use detect::{InputDetector, SlotDescriptor};
pub use editor::{CursorPlacement, Editor, SourceBuffer};
pub use error::{DetectError, FileError, GateError, SessionError};
pub use files::Workspace;
pub use gate::{GateTransition, InputGate, InputSlot};
pub use layout::PaneWidths;
pub use projector::{project, ChartDataset, ComplexityClass, ComplexityReport, ProjectionPoint};
pub use session::{Outcome, RunAction, RunPhase, RunPlan, Session};
pub use types::{ExecutionRequest, ExecutionResult, TraceStep};
