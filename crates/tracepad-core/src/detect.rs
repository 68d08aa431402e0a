//! Lexical detection of input-consuming call sites.
//!
//! The scan is a single-line regular expression over unparsed source: a call
//! of the recognized name whose argument list contains no closing
//! parenthesis. Nested or multi-line calls such as `input(prompt())` or a
//! call split across lines are not detected. Those runs fail at the sandbox
//! instead and surface as a program error.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::DetectError;

/// Call name recognized by [`InputDetector::default`].
pub const DEFAULT_CALL_NAME: &str = "input";

#[allow(clippy::expect_used)]
static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&call_pattern(DEFAULT_CALL_NAME)).expect("constant regex pattern is valid")
});

fn call_pattern(name: &str) -> String {
    format!(r"\b{}\(([^)\n]*)\)", regex::escape(name))
}

/// One detected call site, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotDescriptor {
    /// Zero-based position among all detected call sites.
    pub index: usize,
    /// Byte range of the whole call expression in the scanned text.
    pub span: Range<usize>,
    /// 1-based source line of the call.
    pub line: usize,
    /// Prompt text when the sole argument is a string literal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl SlotDescriptor {
    /// Placeholder shown in an empty entry field.
    pub fn placeholder(&self) -> String {
        match &self.prompt {
            Some(prompt) if !prompt.trim().is_empty() => prompt.trim().to_string(),
            _ => format!("Input {}", self.index + 1),
        }
    }
}

/// Scans source text for calls that will read a run-time value.
#[derive(Debug, Clone)]
pub struct InputDetector {
    pattern: Regex,
}

impl Default for InputDetector {
    fn default() -> Self {
        InputDetector {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}

impl InputDetector {
    /// Builds a detector for a different call name (e.g. `raw_input`).
    pub fn for_call(name: &str) -> Result<Self, DetectError> {
        let valid = name
            .chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_alphanumeric() || c == '_');
        if !valid {
            return Err(DetectError::InvalidCallName {
                name: name.to_string(),
            });
        }
        Ok(InputDetector {
            pattern: Regex::new(&call_pattern(name))?,
        })
    }

    /// Returns one descriptor per call site, left to right, top to bottom.
    pub fn detect(&self, source: &str) -> Vec<SlotDescriptor> {
        self.pattern
            .captures_iter(source)
            .enumerate()
            .filter_map(|(index, caps)| {
                let whole = caps.get(0)?;
                let args = caps.get(1).map_or("", |m| m.as_str());
                Some(SlotDescriptor {
                    index,
                    span: whole.range(),
                    line: source[..whole.start()].matches('\n').count() + 1,
                    prompt: string_literal(args),
                })
            })
            .collect()
    }
}

/// Extracts the body of a single string-literal argument.
fn string_literal(args: &str) -> Option<String> {
    let args = args.trim();
    let quote = args.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = args.strip_prefix(quote)?.strip_suffix(quote)?;
    if body.contains(quote) {
        return None;
    }
    Some(body.to_string())
}

/// Human-readable note on how many slots were found.
pub fn summarize(slots: &[SlotDescriptor]) -> String {
    match slots.len() {
        0 => "No inputs needed.".to_string(),
        1 => "1 input detected.".to_string(),
        n => format!("{} inputs detected.", n),
    }
}
