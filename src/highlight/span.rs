//! Styled spans produced for a single line

use super::category::Category;
use serde::{Deserialize, Serialize};

/// A styled region of one line. Offsets are byte positions into the
/// line text and always fall on character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    pub start: usize,
    pub len: usize,
    pub category: Category,
}

impl StyledSpan {
    pub fn new(start: usize, len: usize, category: Category) -> Self {
        Self {
            start,
            len,
            category,
        }
    }

    /// Byte offset one past the last byte of the span
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Slice the span's text out of its line
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end()]
    }
}
