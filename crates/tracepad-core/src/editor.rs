//! Editor widget contract and an in-memory buffer.

use serde::{Deserialize, Serialize};

/// Where the cursor lands after a wholesale replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorPlacement {
    /// Select the inserted text.
    SelectAll,
    /// Cursor at the start of the document.
    Start,
    /// Cursor after the last character.
    #[default]
    End,
}

/// Narrow contract the controller needs from a text editor.
pub trait Editor {
    fn value(&self) -> String;

    fn set_value(&mut self, text: &str, placement: CursorPlacement);
}

/// Plain in-memory source buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBuffer {
    text: String,
    /// Byte offset of the cursor.
    cursor: usize,
    selection: Option<(usize, usize)>,
}

impl SourceBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        SourceBuffer {
            text,
            cursor,
            selection: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }
}

impl Editor for SourceBuffer {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, text: &str, placement: CursorPlacement) {
        self.text = text.to_string();
        match placement {
            CursorPlacement::SelectAll => {
                self.cursor = self.text.len();
                self.selection = Some((0, self.text.len()));
            }
            CursorPlacement::Start => {
                self.cursor = 0;
                self.selection = None;
            }
            CursorPlacement::End => {
                self.cursor = self.text.len();
                self.selection = None;
            }
        }
    }
}
