//! Editor buffer and file import/export types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Editor contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceView {
    pub code: String,
}

/// Import a local `.py`/`.txt` file into the buffer.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportResponse {
    pub message: String,
}

/// Export the buffer to `dir/code.py`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub path: PathBuf,
}
