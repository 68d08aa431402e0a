//! Bounded playback cursor over a trace.
//!
//! The cursor stores only its position and bound; rendering borrows the trace
//! from the result that owns it. Pointer triggers and keyboard shortcuts both
//! resolve to the same four [`Navigation`] transitions.

use serde::{Deserialize, Serialize};

use crate::types::TraceStep;

/// The four cursor transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    ToStart,
    StepBack,
    StepForward,
    ToEnd,
}

impl Navigation {
    /// Maps a keyboard key name to a transition (`ArrowLeft`, `ArrowRight`,
    /// `Home`, `End`). Other keys are not navigation.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Navigation::StepBack),
            "ArrowRight" => Some(Navigation::StepForward),
            "Home" => Some(Navigation::ToStart),
            "End" => Some(Navigation::ToEnd),
            _ => None,
        }
    }

    /// Parses a control name as used in URLs and the terminal front-end.
    pub fn from_control(name: &str) -> Option<Self> {
        match name {
            "start" | "first" | "home" | "s" => Some(Navigation::ToStart),
            "back" | "prev" | "left" | "b" => Some(Navigation::StepBack),
            "forward" | "next" | "right" | "f" => Some(Navigation::StepForward),
            "end" | "last" | "e" => Some(Navigation::ToEnd),
            _ => None,
        }
    }
}

/// Cursor state: `Empty` when the trace has no steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TraceCursor {
    #[default]
    Empty,
    Active { position: usize, bound: usize },
}

/// The step at the cursor, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    /// Zero-based position.
    pub index: usize,
    /// Trace length.
    pub total: usize,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// `Step K / N`, 1-based.
    pub indicator: String,
}

impl TraceCursor {
    /// Initial cursor for a freshly received trace.
    pub fn for_trace(steps: &[TraceStep]) -> Self {
        match steps.len() {
            0 => TraceCursor::Empty,
            len => TraceCursor::Active {
                position: 0,
                bound: len - 1,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TraceCursor::Empty)
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            TraceCursor::Empty => None,
            TraceCursor::Active { position, .. } => Some(*position),
        }
    }

    pub fn to_start(&mut self) {
        if let TraceCursor::Active { position, .. } = self {
            *position = 0;
        }
    }

    pub fn step_back(&mut self) {
        if let TraceCursor::Active { position, .. } = self {
            *position = position.saturating_sub(1);
        }
    }

    pub fn step_forward(&mut self) {
        if let TraceCursor::Active { position, bound } = self {
            *position = (*position + 1).min(*bound);
        }
    }

    pub fn to_end(&mut self) {
        if let TraceCursor::Active { position, bound } = self {
            *position = *bound;
        }
    }

    /// Applies one transition. No-op when empty.
    pub fn apply(&mut self, nav: Navigation) {
        match nav {
            Navigation::ToStart => self.to_start(),
            Navigation::StepBack => self.step_back(),
            Navigation::StepForward => self.step_forward(),
            Navigation::ToEnd => self.to_end(),
        }
    }

    /// Renders the step at the current position.
    ///
    /// `steps` must be the trace this cursor was created for.
    pub fn render(&self, steps: &[TraceStep]) -> Option<StepView> {
        let position = self.position()?;
        let step = steps.get(position)?;
        Some(StepView {
            index: position,
            total: steps.len(),
            content: step.content.clone(),
            kind: step.kind.clone(),
            indicator: format!("Step {} / {}", position + 1, steps.len()),
        })
    }
}
