//! Error types for tracepad-core.
//!
//! Uses `thiserror` for structured, matchable variants. None of these are
//! fatal: every failure leaves the session in a state the user can retry from.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building an input detector.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The recognized call name is not a plain identifier.
    #[error("invalid call name: '{name}'")]
    InvalidCallName { name: String },

    /// The generated pattern failed to compile.
    #[error("invalid detection pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors produced by the input collection gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// No slot exists at the given index.
    #[error("input slot {index} does not exist ({count} slot(s) detected)")]
    SlotOutOfRange { index: usize, count: usize },

    /// Values were requested before every slot was filled.
    #[error("{missing} of {count} input(s) still blank")]
    NotReady { missing: usize, count: usize },
}

/// Errors produced by session phase transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A request is already outstanding.
    #[error("a run is already in progress")]
    Busy,

    /// The operation requires the input collection step.
    #[error("no inputs are being collected")]
    NotCollecting,

    /// The operation requires an outstanding request.
    #[error("no run is in progress")]
    NotRunning,

    /// A gate-level failure (unknown slot, incomplete inputs).
    #[error(transparent)]
    Gate(#[from] GateError),
}

/// Errors produced by source file import/export.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file extension is not one the importer accepts.
    #[error("unsupported file type: {path} (expected .py or .txt)")]
    UnsupportedExtension { path: PathBuf },

    /// The path resolves outside the workspace root.
    #[error("path is outside the workspace: {path}")]
    OutsideWorkspace { path: PathBuf },

    /// The underlying read or write failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
