//! Line highlighting: categories, carried state, spans, and the scanner

pub mod category;
pub mod scanner;
pub mod span;
pub mod state;

pub use category::Category;
pub use scanner::{HighlightMetrics, LineHighlight, Scanner};
pub use span::StyledSpan;
pub use state::{HighlightState, LineState};

use crate::lexicon::Lexicon;
use std::sync::Arc;

/// One-shot convenience: scan a single line with a fresh scanner.
/// Callers that scan many lines should hold a `Scanner` instead.
pub fn highlight_line(lexicon: &Arc<Lexicon>, text: &str, entering: HighlightState) -> LineHighlight {
    Scanner::new(Arc::clone(lexicon)).highlight_line(text, entering)
}
