//! Wire types exchanged with the remote execution service.
//!
//! [`ExecutionRequest`] is built once per submission and never mutated after
//! dispatch. [`ExecutionResult`] is received once per request and supersedes
//! the previous result in full.

use serde::{Deserialize, Deserializer, Serialize};

/// Label used when the execution service omits `time_complexity`.
pub const UNKNOWN_COMPLEXITY: &str = "Unknown";

/// Payload sent to the execution service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Source text exactly as it was when the run was requested.
    pub code: String,
    /// One value per detected input slot, in detection order.
    pub inputs: Vec<String>,
}

impl ExecutionRequest {
    pub fn new(code: impl Into<String>, inputs: Vec<String>) -> Self {
        ExecutionRequest {
            code: code.into(),
            inputs,
        }
    }
}

/// One chronological moment of the execution trace.
///
/// The controller never reorders or deduplicates steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Step category reported by the service (`assign`, `print`, `for`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable description of the step.
    pub content: String,
}

impl TraceStep {
    pub fn new(content: impl Into<String>) -> Self {
        TraceStep {
            kind: None,
            content: content.into(),
        }
    }

    pub fn with_kind(kind: impl Into<String>, content: impl Into<String>) -> Self {
        TraceStep {
            kind: Some(kind.into()),
            content: content.into(),
        }
    }
}

/// Response body from the execution service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Captured standard output.
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: String,
    /// Program-level error reported by the sandbox. Blank strings are
    /// normalized to `None`.
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
    /// Trace steps; empty means no playback is available.
    #[serde(default, deserialize_with = "null_as_default")]
    pub trace: Vec<TraceStep>,
    /// Asymptotic class label, e.g. `O(n^2)`.
    #[serde(default = "unknown_complexity", deserialize_with = "null_as_unknown")]
    pub time_complexity: String,
    /// Measured wall-clock time in seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub execution_time: f64,
}

impl ExecutionResult {
    /// Returns `true` if the sandbox reported a program-level error.
    pub fn is_program_error(&self) -> bool {
        self.error.is_some()
    }
}

fn unknown_complexity() -> String {
    UNKNOWN_COMPLEXITY.to_string()
}

// `#[serde(default)]` only covers absent fields; these also cover `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_complexity))
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_code_and_inputs() {
        let req = ExecutionRequest::new("x = input()", vec!["5".to_string()]);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({ "code": "x = input()", "inputs": ["5"] }));
    }

    #[test]
    fn blank_error_is_absent() {
        let result: ExecutionResult = serde_json::from_value(json!({
            "output": "hi",
            "error": "",
            "trace": [],
            "time_complexity": "O(1)",
            "execution_time": 0.01
        }))
        .unwrap();
        assert_eq!(result.error, None);
        assert!(!result.is_program_error());
    }

    #[test]
    fn error_field_is_kept_verbatim() {
        let result: ExecutionResult = serde_json::from_value(json!({
            "output": "",
            "error": "Traceback (most recent call last):\n  NameError",
        }))
        .unwrap();
        assert_eq!(
            result.error.as_deref(),
            Some("Traceback (most recent call last):\n  NameError")
        );
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let result: ExecutionResult = serde_json::from_value(json!({ "output": "ok" })).unwrap();
        assert!(result.trace.is_empty());
        assert_eq!(result.time_complexity, UNKNOWN_COMPLEXITY);
        assert_eq!(result.execution_time, 0.0);
    }

    #[test]
    fn null_trace_is_empty() {
        let result: ExecutionResult = serde_json::from_value(json!({
            "output": "42\n",
            "error": "",
            "trace": null,
            "time_complexity": "O(1)",
            "execution_time": 0.5
        }))
        .unwrap();
        assert_eq!(result.output, "42\n");
        assert!(result.trace.is_empty());
        assert_eq!(result.execution_time, 0.5);
    }

    #[test]
    fn null_complexity_is_unknown() {
        let result: ExecutionResult = serde_json::from_value(json!({
            "output": "ok",
            "trace": [{ "content": "x = 1" }],
            "time_complexity": null
        }))
        .unwrap();
        assert_eq!(result.time_complexity, UNKNOWN_COMPLEXITY);
        assert_eq!(result.trace.len(), 1);
    }

    #[test]
    fn null_execution_time_is_zero() {
        let result: ExecutionResult = serde_json::from_str(
            r#"{"output": "ok", "time_complexity": "O(n)", "execution_time": null}"#,
        )
        .unwrap();
        assert_eq!(result.execution_time, 0.0);
        assert_eq!(result.time_complexity, "O(n)");
    }

    #[test]
    fn null_output_is_empty() {
        let result: ExecutionResult = serde_json::from_value(json!({
            "output": null,
            "error": "NameError: name 'x' is not defined"
        }))
        .unwrap();
        assert_eq!(result.output, "");
        assert!(result.is_program_error());
    }

    #[test]
    fn trace_step_reads_type_tag() {
        let step: TraceStep =
            serde_json::from_value(json!({ "type": "assign", "content": "x = 5" })).unwrap();
        assert_eq!(step, TraceStep::with_kind("assign", "x = 5"));

        let bare: TraceStep = serde_json::from_value(json!({ "content": "x = 5" })).unwrap();
        assert_eq!(bare.kind, None);
    }

    #[test]
    fn trace_order_is_preserved() {
        let result: ExecutionResult = serde_json::from_value(json!({
            "output": "",
            "trace": [
                { "content": "b" },
                { "content": "a" },
                { "content": "b" }
            ]
        }))
        .unwrap();
        let contents: Vec<_> = result.trace.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["b", "a", "b"]);
    }
}
