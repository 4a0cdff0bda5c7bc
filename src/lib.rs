//! linelight: incremental line-based syntax highlighting
//!
//! Scans source text one line at a time, carrying the small lexical
//! state (open strings, a pending class name) across line boundaries
//! so edits only rescan the lines whose state actually changed.

pub mod config;
pub mod document;
pub mod highlight;
pub mod lexicon;
pub mod logging;

pub use document::{DocumentError, DocumentHighlighter, LineEntry};
pub use highlight::{
    Category, HighlightState, LineHighlight, LineState, Scanner, StyledSpan,
};
pub use lexicon::{Lexicon, LexiconBuilder, LexiconError};
