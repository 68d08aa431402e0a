//! Complexity projection request type.
//!
//! Responses are [`tracepad_core::ComplexityReport`] serialized as-is.

use serde::Deserialize;

/// Ad-hoc projection of one measurement.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRequest {
    /// Complexity label, e.g. `O(n)`. Unknown labels project as constant.
    pub label: String,
    /// Measured execution time in seconds.
    pub execution_time: f64,
}
