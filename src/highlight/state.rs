//! Lexical state carried between lines
//!
//! A line's appearance depends only on its text and the state its
//! predecessor exited with. The state is small and copyable so the
//! document layer can store it per line and compare cheaply.

use serde::{Deserialize, Serialize};

/// Where the previous line left the string scanner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineState {
    /// Not inside any string construct
    #[default]
    Normal,
    /// Inside a '''-delimited multi-line string
    InTripleSingle,
    /// Inside a \"\"\"-delimited multi-line string
    InTripleDouble,
    /// A single-quoted string was opened and never closed
    InSingleUnclosed,
    /// A double-quoted string was opened and never closed
    InDoubleUnclosed,
}

impl LineState {
    /// True when the line starts inside string content
    pub fn is_in_string(&self) -> bool {
        !matches!(self, LineState::Normal)
    }
}

/// Full per-line entering/exiting state: string continuation plus the
/// flag that styles the next identifier after a `class` keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightState {
    pub line_state: LineState,
    /// Set when `class` was seen and its name has not appeared yet.
    /// Persists across lines until an identifier consumes it.
    pub pending_class_name: bool,
}

impl HighlightState {
    pub fn new(line_state: LineState, pending_class_name: bool) -> Self {
        Self {
            line_state,
            pending_class_name,
        }
    }

    pub fn in_string(line_state: LineState) -> Self {
        Self {
            line_state,
            pending_class_name: false,
        }
    }
}
