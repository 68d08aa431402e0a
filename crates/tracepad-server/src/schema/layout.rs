//! Pane resize request type.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ResizeRequest {
    /// Pointer position from the left edge.
    pub pointer_x: f64,
    pub viewport_width: f64,
}
