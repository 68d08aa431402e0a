//! Two-pane split driven by a drag handle.

use serde::Serialize;

/// Widths of the editor (left) and result (right) panes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaneWidths {
    pub left: f64,
    pub right: f64,
}

impl PaneWidths {
    /// Splits the viewport at the pointer, clamped to `[0, viewport_width]`.
    pub fn from_pointer(pointer_x: f64, viewport_width: f64) -> Self {
        let viewport = viewport_width.max(0.0);
        let left = if pointer_x.is_nan() {
            viewport / 2.0
        } else {
            pointer_x.clamp(0.0, viewport)
        };
        PaneWidths {
            left,
            right: viewport - left,
        }
    }
}
