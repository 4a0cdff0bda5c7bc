//! Document-level incremental highlighting
//!
//! Keeps one entry per line with its text, the state it was scanned
//! with, its spans, and the state it exited with. Edits rescan the
//! touched line and cascade downward only while a line's entering
//! state actually changed.

use crate::config::compile_time;
use crate::config::runtime::{DocumentPreferences, ScannerPreferences};
use crate::highlight::{HighlightState, Scanner, StyledSpan};
use crate::lexicon::Lexicon;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::sync::Arc;

/// Errors raised by document operations
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("line index {index} out of range for document with {line_count} lines")]
    LineOutOfRange { index: usize, line_count: usize },

    #[error("document has {count} lines, exceeding the maximum")]
    TooManyLines { count: usize },
}

impl DocumentError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            DocumentError::LineOutOfRange { .. } => codes::document::LINE_OUT_OF_RANGE,
            DocumentError::TooManyLines { .. } => codes::document::DOCUMENT_TOO_LARGE,
        }
    }
}

/// One tracked line with its cached highlight results
#[derive(Debug, Clone)]
pub struct LineEntry {
    pub text: String,
    pub entering: HighlightState,
    pub spans: Vec<StyledSpan>,
    pub exiting: HighlightState,
}

/// Edit statistics, accumulated across document operations
#[derive(Debug, Clone, Default)]
pub struct DocumentMetrics {
    pub edits: u64,
    pub lines_recomputed: u64,
    pub longest_cascade: usize,
}

impl DocumentMetrics {
    fn record_edit(&mut self, cascade: usize) {
        self.edits += 1;
        self.lines_recomputed += cascade as u64;
        if cascade > self.longest_cascade {
            self.longest_cascade = cascade;
        }
    }
}

/// Incremental highlighter over a whole document
pub struct DocumentHighlighter {
    scanner: Scanner,
    preferences: DocumentPreferences,
    metrics: DocumentMetrics,
    lines: Vec<LineEntry>,
}

impl DocumentHighlighter {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self::with_preferences(
            lexicon,
            ScannerPreferences::default(),
            DocumentPreferences::default(),
        )
    }

    pub fn with_preferences(
        lexicon: Arc<Lexicon>,
        scanner_preferences: ScannerPreferences,
        preferences: DocumentPreferences,
    ) -> Self {
        Self {
            scanner: Scanner::with_preferences(lexicon, scanner_preferences),
            preferences,
            metrics: DocumentMetrics::default(),
            lines: Vec::new(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[LineEntry] {
        &self.lines
    }

    pub fn entry(&self, index: usize) -> Option<&LineEntry> {
        self.lines.get(index)
    }

    pub fn metrics(&self) -> &DocumentMetrics {
        &self.metrics
    }

    pub fn scanner_metrics(&self) -> &crate::highlight::HighlightMetrics {
        self.scanner.metrics()
    }

    /// The state the last line exits with
    pub fn final_state(&self) -> HighlightState {
        self.lines
            .last()
            .map(|entry| entry.exiting)
            .unwrap_or_default()
    }

    /// Reconstruct the document text
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self.lines.iter().map(|entry| entry.text.as_str()).collect();
        parts.join("\n")
    }

    /// Spans for one line
    pub fn line_spans(&self, index: usize) -> Result<&[StyledSpan], DocumentError> {
        match self.lines.get(index) {
            Some(entry) => Ok(&entry.spans),
            None => Err(self.out_of_range(index)),
        }
    }

    /// Replace the whole document and highlight every line
    pub fn set_text(&mut self, text: &str) -> Result<(), DocumentError> {
        let count = text.split('\n').count();
        if count > compile_time::document::MAX_DOCUMENT_LINES {
            let error = DocumentError::TooManyLines { count };
            log_error!(error.error_code(), "Document rejected",
                "lines" => count
            );
            return Err(error);
        }

        self.lines.clear();
        let mut state = HighlightState::default();
        for line in text.split('\n') {
            let result = self.scanner.highlight_line(line, state);
            self.lines.push(LineEntry {
                text: line.to_string(),
                entering: state,
                spans: result.spans,
                exiting: result.exiting,
            });
            state = result.exiting;
        }

        log_success!(codes::success::DOCUMENT_REFRESH_COMPLETE, "Document highlighted",
            "lines" => self.lines.len()
        );

        Ok(())
    }

    /// Replace one line's text. Returns how many lines were rescanned.
    pub fn replace_line(&mut self, index: usize, text: &str) -> Result<usize, DocumentError> {
        if index >= self.lines.len() {
            return Err(self.out_of_range(index));
        }

        self.lines[index].text = text.to_string();
        let cascade = self.recompute_from(index);
        self.finish_edit(cascade);
        Ok(cascade)
    }

    /// Insert a line before `index` (`index == line_count` appends).
    /// Returns how many lines were rescanned.
    pub fn insert_line(&mut self, index: usize, text: &str) -> Result<usize, DocumentError> {
        if index > self.lines.len() {
            return Err(self.out_of_range(index));
        }
        if self.lines.len() + 1 > compile_time::document::MAX_DOCUMENT_LINES {
            let error = DocumentError::TooManyLines {
                count: self.lines.len() + 1,
            };
            log_error!(error.error_code(), "Insert rejected",
                "lines" => self.lines.len() + 1
            );
            return Err(error);
        }

        // Placeholder state; recompute_from rescans this entry first
        self.lines.insert(
            index,
            LineEntry {
                text: text.to_string(),
                entering: HighlightState::default(),
                spans: Vec::new(),
                exiting: HighlightState::default(),
            },
        );

        let cascade = self.recompute_from(index);
        self.finish_edit(cascade);
        Ok(cascade)
    }

    /// Remove one line. Returns how many following lines were rescanned.
    pub fn remove_line(&mut self, index: usize) -> Result<usize, DocumentError> {
        if index >= self.lines.len() {
            return Err(self.out_of_range(index));
        }

        self.lines.remove(index);

        let cascade = if index < self.lines.len() {
            self.recompute_from(index)
        } else {
            0
        };
        self.finish_edit(cascade);
        Ok(cascade)
    }

    /// Rescan from `index` downward. The first line is always rescanned;
    /// each following line is rescanned only while its stored entering
    /// state no longer matches its predecessor's exit state.
    fn recompute_from(&mut self, index: usize) -> usize {
        let mut rescanned = 0;

        for i in index..self.lines.len() {
            let entering = if i == 0 {
                HighlightState::default()
            } else {
                self.lines[i - 1].exiting
            };

            if i != index && self.lines[i].entering == entering {
                break;
            }

            let result = self.scanner.highlight_line(&self.lines[i].text, entering);
            let entry = &mut self.lines[i];
            entry.entering = entering;
            entry.spans = result.spans;
            entry.exiting = result.exiting;
            rescanned += 1;
        }

        rescanned
    }

    fn finish_edit(&mut self, cascade: usize) {
        if self.preferences.track_recompute_counts {
            self.metrics.record_edit(cascade);
        }
        if self.preferences.log_cascade_statistics {
            log_debug!("Edit cascade finished",
                "rescanned" => cascade,
                "lines" => self.lines.len()
            );
        }
    }

    fn out_of_range(&self, index: usize) -> DocumentError {
        let error = DocumentError::LineOutOfRange {
            index,
            line_count: self.lines.len(),
        };
        log_error!(error.error_code(), "Line index out of range",
            "index" => index,
            "line_count" => self.lines.len()
        );
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{Category, LineState};
    use assert_matches::assert_matches;

    fn highlighter() -> DocumentHighlighter {
        DocumentHighlighter::new(Arc::new(Lexicon::python_default()))
    }

    fn categories(entry: &LineEntry) -> Vec<Category> {
        entry.spans.iter().map(|s| s.category).collect()
    }

    #[test]
    fn test_set_text_threads_state() {
        let mut doc = highlighter();
        doc.set_text("s = '''doc\nstill inside\nend''' + 1\nif x")
            .unwrap();

        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.entry(0).unwrap().exiting.line_state, LineState::InTripleSingle);
        assert_eq!(categories(doc.entry(1).unwrap()), vec![Category::String]);
        assert_eq!(doc.entry(1).unwrap().exiting.line_state, LineState::InTripleSingle);
        assert_eq!(
            categories(doc.entry(2).unwrap()),
            vec![Category::String, Category::Number]
        );
        assert_eq!(doc.entry(2).unwrap().exiting.line_state, LineState::Normal);
        assert_eq!(categories(doc.entry(3).unwrap()), vec![Category::Keyword]);
    }

    #[test]
    fn test_replace_line_cascades_until_stable() {
        let mut doc = highlighter();
        doc.set_text("s = '''\na\nb\nif x").unwrap();
        // Everything after line 0 is string content
        assert_eq!(categories(doc.entry(3).unwrap()), vec![Category::String]);

        let cascade = doc.replace_line(0, "s = 0").unwrap();
        assert_eq!(cascade, 4);
        assert_eq!(categories(doc.entry(3).unwrap()), vec![Category::Keyword]);
        assert_eq!(doc.final_state(), HighlightState::default());
    }

    #[test]
    fn test_replace_line_stops_when_state_unchanged() {
        let mut doc = highlighter();
        doc.set_text("a\nb\nc").unwrap();

        let cascade = doc.replace_line(0, "x = 1").unwrap();
        assert_eq!(cascade, 1);
        assert_eq!(categories(doc.entry(0).unwrap()), vec![Category::Number]);
    }

    #[test]
    fn test_insert_line_opens_string_over_following_lines() {
        let mut doc = highlighter();
        doc.set_text("if x\nreturn 1").unwrap();

        let cascade = doc.insert_line(0, "s = \"\"\"").unwrap();
        assert_eq!(cascade, 3);
        assert_eq!(doc.line_count(), 3);
        assert_eq!(categories(doc.entry(1).unwrap()), vec![Category::String]);
        assert_eq!(doc.final_state().line_state, LineState::InTripleDouble);
    }

    #[test]
    fn test_insert_line_appends() {
        let mut doc = highlighter();
        doc.set_text("if x").unwrap();

        let cascade = doc.insert_line(1, "return 2").unwrap();
        assert_eq!(cascade, 1);
        assert_eq!(doc.line_count(), 2);
        assert_eq!(
            categories(doc.entry(1).unwrap()),
            vec![Category::Keyword, Category::Number]
        );
    }

    #[test]
    fn test_remove_line_closes_string() {
        let mut doc = highlighter();
        doc.set_text("s = '''\nif x\n").unwrap();
        assert_eq!(categories(doc.entry(1).unwrap()), vec![Category::String]);

        let cascade = doc.remove_line(0).unwrap();
        assert_eq!(cascade, 2);
        assert_eq!(categories(doc.entry(0).unwrap()), vec![Category::Keyword]);
    }

    #[test]
    fn test_remove_last_line_rescans_nothing() {
        let mut doc = highlighter();
        doc.set_text("a\nb").unwrap();

        let cascade = doc.remove_line(1).unwrap();
        assert_eq!(cascade, 0);
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn test_pending_class_name_cascades() {
        let mut doc = highlighter();
        doc.set_text("class\nFoo").unwrap();
        assert_eq!(categories(doc.entry(1).unwrap()), vec![Category::ClassName]);

        // Removing the class keyword un-styles the name
        doc.replace_line(0, "x").unwrap();
        assert!(doc.entry(1).unwrap().spans.is_empty());
    }

    #[test]
    fn test_out_of_range_errors() {
        let mut doc = highlighter();
        doc.set_text("one line").unwrap();

        assert_matches!(
            doc.replace_line(5, "x"),
            Err(DocumentError::LineOutOfRange { index: 5, line_count: 1 })
        );
        assert_matches!(doc.remove_line(1), Err(DocumentError::LineOutOfRange { .. }));
        assert_matches!(doc.insert_line(2, "x"), Err(DocumentError::LineOutOfRange { .. }));
        assert_matches!(doc.line_spans(9), Err(DocumentError::LineOutOfRange { .. }));

        let error = doc.line_spans(9).unwrap_err();
        assert_eq!(
            error.error_code().as_str(),
            codes::document::LINE_OUT_OF_RANGE.as_str()
        );
    }

    #[test]
    fn test_document_size_limit() {
        let mut doc = highlighter();
        let text = "\n".repeat(compile_time::document::MAX_DOCUMENT_LINES);
        let result = doc.set_text(&text);
        assert_matches!(result, Err(DocumentError::TooManyLines { .. }));
        assert_eq!(doc.line_count(), 0);
    }

    #[test]
    fn test_text_round_trip() {
        let mut doc = highlighter();
        let source = "def f():\n    return 'x'\n";
        doc.set_text(source).unwrap();
        assert_eq!(doc.text(), source);
        assert_eq!(doc.line_count(), 3);
    }

    #[test]
    fn test_edit_metrics() {
        let mut doc = highlighter();
        doc.set_text("s = '''\na\nb").unwrap();
        doc.replace_line(0, "s = 0").unwrap();
        doc.replace_line(2, "c").unwrap();

        let metrics = doc.metrics();
        assert_eq!(metrics.edits, 2);
        assert_eq!(metrics.longest_cascade, 3);
        assert_eq!(metrics.lines_recomputed, 4);
    }

    #[test]
    fn test_empty_document() {
        let mut doc = highlighter();
        doc.set_text("").unwrap();
        // An empty string is one empty line
        assert_eq!(doc.line_count(), 1);
        assert!(doc.line_spans(0).unwrap().is_empty());
        assert_eq!(doc.final_state(), HighlightState::default());
    }
}
