//! Single-line scanner
//!
//! Scans one line left to right, carrying the string state it entered
//! with and producing styled spans plus the state it exits with. The
//! scan is a single pass: at each position the earliest-starting token
//! wins, with ties broken by a fixed priority order.

use super::category::Category;
use super::span::StyledSpan;
use super::state::{HighlightState, LineState};
use crate::config::compile_time;
use crate::config::runtime::ScannerPreferences;
use crate::lexicon::Lexicon;
use crate::logging::codes;
use crate::{log_debug, log_warning};
use std::collections::HashMap;
use std::sync::Arc;

const TRIPLE_SINGLE: &str = "'''";
const TRIPLE_DOUBLE: &str = "\"\"\"";
const SELF_TOKEN: &str = "self.";

/// Result of scanning one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlight {
    pub spans: Vec<StyledSpan>,
    pub exiting: HighlightState,
}

/// Tokens the normal-mode scan can start at
#[derive(Debug, Clone, Copy)]
enum Token {
    TripleSingle,
    TripleDouble,
    SingleQuote,
    DoubleQuote,
    Comment,
    Magic(usize),
    Number(usize),
    Callable(usize),
    SelfRef,
}

/// Scan statistics, accumulated across lines
#[derive(Debug, Clone, Default)]
pub struct HighlightMetrics {
    pub lines_scanned: u64,
    pub spans_emitted: u64,
    pub longest_line: usize,
    pub category_usage: HashMap<Category, u64>,
}

impl HighlightMetrics {
    fn record_line(&mut self, length: usize, spans: &[StyledSpan], detailed: bool) {
        self.lines_scanned += 1;
        self.spans_emitted += spans.len() as u64;
        if length > self.longest_line {
            self.longest_line = length;
        }
        if detailed {
            for span in spans {
                *self.category_usage.entry(span.category).or_insert(0) += 1;
            }
        }
    }
}

/// Line scanner with its lexicon, preferences, and metrics
pub struct Scanner {
    lexicon: Arc<Lexicon>,
    preferences: ScannerPreferences,
    metrics: HighlightMetrics,
}

impl Scanner {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self::with_preferences(lexicon, ScannerPreferences::default())
    }

    pub fn with_preferences(lexicon: Arc<Lexicon>, preferences: ScannerPreferences) -> Self {
        Self {
            lexicon,
            preferences,
            metrics: HighlightMetrics::default(),
        }
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn metrics(&self) -> &HighlightMetrics {
        &self.metrics
    }

    /// Scan one line given the state its predecessor exited with
    pub fn highlight_line(&mut self, text: &str, entering: HighlightState) -> LineHighlight {
        let mut spans = Vec::new();
        let mut state = entering;
        let mut pos = 0;

        loop {
            match state.line_state {
                LineState::InTripleSingle => {
                    if !self.continue_triple(text, &mut pos, &mut state, &mut spans, TRIPLE_SINGLE)
                    {
                        break;
                    }
                }
                LineState::InTripleDouble => {
                    if !self.continue_triple(text, &mut pos, &mut state, &mut spans, TRIPLE_DOUBLE)
                    {
                        break;
                    }
                }
                LineState::InSingleUnclosed => {
                    if !self.continue_quoted(text, &mut pos, &mut state, &mut spans, '\'') {
                        break;
                    }
                }
                LineState::InDoubleUnclosed => {
                    if !self.continue_quoted(text, &mut pos, &mut state, &mut spans, '"') {
                        break;
                    }
                }
                LineState::Normal => {
                    let found = self.find_next_token(text, pos);

                    let gap_end = found.map_or(text.len(), |(tpos, _)| tpos);
                    self.scan_words(text, pos, gap_end, &mut spans, &mut state);

                    let Some((tpos, token)) = found else {
                        break;
                    };

                    match token {
                        Token::Comment => {
                            self.push_span(
                                &mut spans,
                                StyledSpan::new(tpos, text.len() - tpos, Category::Comment),
                            );
                            break;
                        }
                        Token::TripleSingle => {
                            self.push_span(&mut spans, StyledSpan::new(tpos, 3, Category::String));
                            pos = tpos + 3;
                            state.line_state = LineState::InTripleSingle;
                        }
                        Token::TripleDouble => {
                            self.push_span(&mut spans, StyledSpan::new(tpos, 3, Category::String));
                            pos = tpos + 3;
                            state.line_state = LineState::InTripleDouble;
                        }
                        Token::SingleQuote => {
                            self.push_span(&mut spans, StyledSpan::new(tpos, 1, Category::String));
                            pos = tpos + 1;
                            state.line_state = LineState::InSingleUnclosed;
                        }
                        Token::DoubleQuote => {
                            self.push_span(&mut spans, StyledSpan::new(tpos, 1, Category::String));
                            pos = tpos + 1;
                            state.line_state = LineState::InDoubleUnclosed;
                        }
                        Token::Magic(len) => {
                            self.push_span(
                                &mut spans,
                                StyledSpan::new(tpos, len, Category::MagicMethod),
                            );
                            pos = tpos + len;
                        }
                        Token::Number(len) => {
                            self.push_span(&mut spans, StyledSpan::new(tpos, len, Category::Number));
                            pos = tpos + len;
                        }
                        Token::Callable(len) => {
                            self.push_span(
                                &mut spans,
                                StyledSpan::new(tpos, len, Category::FunctionName),
                            );
                            pos = tpos + len;
                        }
                        Token::SelfRef => {
                            self.push_span(
                                &mut spans,
                                StyledSpan::new(tpos, SELF_TOKEN.len(), Category::SelfReference),
                            );
                            pos = tpos + SELF_TOKEN.len();
                        }
                    }
                }
            }
        }

        if spans.len() > compile_time::highlight::MAX_SPANS_PER_LINE {
            log_warning!(codes::highlight::SPAN_BUDGET_EXCEEDED,
                "Line produced an unusually large number of spans",
                "spans" => spans.len(),
                "line_length" => text.len()
            );
        }
        if text.len() > compile_time::highlight::LONG_LINE_THRESHOLD {
            log_warning!(codes::highlight::LONG_LINE, "Scanning a very long line",
                "length" => text.len()
            );
        }
        if self.preferences.log_line_statistics {
            log_debug!("Scanned line",
                "length" => text.len(),
                "spans" => spans.len()
            );
        }

        self.metrics
            .record_line(text.len(), &spans, self.preferences.collect_detailed_metrics);

        LineHighlight {
            spans,
            exiting: state,
        }
    }

    /// Continue a triple-quoted string. Returns false when the line ends
    /// inside the string.
    fn continue_triple(
        &self,
        text: &str,
        pos: &mut usize,
        state: &mut HighlightState,
        spans: &mut Vec<StyledSpan>,
        delimiter: &str,
    ) -> bool {
        if let Some(i) = text[*pos..].find(delimiter) {
            let close = *pos + i + delimiter.len();
            self.push_span(spans, StyledSpan::new(*pos, close - *pos, Category::String));
            *pos = close;
            state.line_state = LineState::Normal;
            true
        } else {
            if *pos < text.len() {
                self.push_span(
                    spans,
                    StyledSpan::new(*pos, text.len() - *pos, Category::String),
                );
            }
            false
        }
    }

    /// Continue an unclosed single- or double-quoted string. Returns
    /// false when the line ends with the string still open.
    fn continue_quoted(
        &self,
        text: &str,
        pos: &mut usize,
        state: &mut HighlightState,
        spans: &mut Vec<StyledSpan>,
        quote: char,
    ) -> bool {
        if let Some(i) = find_unescaped(text, *pos, quote) {
            let close = i + quote.len_utf8();
            self.push_span(spans, StyledSpan::new(*pos, close - *pos, Category::String));
            *pos = close;
            state.line_state = LineState::Normal;
            true
        } else {
            if *pos < text.len() {
                self.push_span(
                    spans,
                    StyledSpan::new(*pos, text.len() - *pos, Category::String),
                );
            }
            false
        }
    }

    /// Earliest-starting token at or after `from`. Ties go to the
    /// earlier entry in the priority order below.
    fn find_next_token(&self, text: &str, from: usize) -> Option<(usize, Token)> {
        let rest = &text[from..];
        let mut best: Option<(usize, Token)> = None;

        let candidates = [
            rest.find(TRIPLE_SINGLE).map(|i| (from + i, Token::TripleSingle)),
            rest.find(TRIPLE_DOUBLE).map(|i| (from + i, Token::TripleDouble)),
            rest.find('\'').map(|i| (from + i, Token::SingleQuote)),
            rest.find('"').map(|i| (from + i, Token::DoubleQuote)),
            rest.find(self.lexicon.comment_marker())
                .map(|i| (from + i, Token::Comment)),
            self.find_magic(text, from)
                .map(|(p, len)| (p, Token::Magic(len))),
            find_number(text, from).map(|(p, len)| (p, Token::Number(len))),
            find_callable(text, from).map(|(p, len)| (p, Token::Callable(len))),
            find_self_ref(text, from).map(|p| (p, Token::SelfRef)),
        ];

        for candidate in candidates.into_iter().flatten() {
            match best {
                Some((bpos, _)) if bpos <= candidate.0 => {}
                _ => best = Some(candidate),
            }
        }

        best
    }

    /// Earliest word-bounded magic-method occurrence
    fn find_magic(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;

        for method in self.lexicon.magic_methods() {
            let mut search = from;
            while let Some(i) = text[search..].find(method.as_str()) {
                let pos = search + i;
                let end = pos + method.len();
                let before_ok = text[..pos]
                    .chars()
                    .next_back()
                    .map_or(true, |c| !is_word_continue(c));
                let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_continue(c));

                if before_ok && after_ok {
                    if best.map_or(true, |(bpos, _)| pos < bpos) {
                        best = Some((pos, method.len()));
                    }
                    break;
                }

                search = pos
                    + text[pos..]
                        .chars()
                        .next()
                        .map_or(1, |c| c.len_utf8());
            }
        }

        best
    }

    /// Scan plain text between tokens for keywords, the pending class
    /// name, and (optionally) brackets.
    fn scan_words(
        &self,
        text: &str,
        start: usize,
        end: usize,
        spans: &mut Vec<StyledSpan>,
        state: &mut HighlightState,
    ) {
        let mut prev_is_word = text[..start]
            .chars()
            .next_back()
            .is_some_and(is_word_continue);
        let mut iter = text[start..end].char_indices().peekable();

        while let Some((i, ch)) = iter.next() {
            if !prev_is_word && is_word_start(ch) {
                let wstart = start + i;
                let mut wend = wstart + ch.len_utf8();
                while let Some(&(j, c2)) = iter.peek() {
                    if is_word_continue(c2) {
                        wend = start + j + c2.len_utf8();
                        iter.next();
                    } else {
                        break;
                    }
                }

                let word = &text[wstart..wend];
                if state.pending_class_name {
                    self.push_span(
                        spans,
                        StyledSpan::new(wstart, wend - wstart, Category::ClassName),
                    );
                    state.pending_class_name = false;
                } else if self.lexicon.is_keyword(word) {
                    self.push_span(
                        spans,
                        StyledSpan::new(wstart, wend - wstart, Category::Keyword),
                    );
                    if word == "class" {
                        state.pending_class_name = true;
                    }
                }

                prev_is_word = true;
                continue;
            }

            if self.preferences.style_brackets && self.lexicon.is_bracket(ch) {
                self.push_span(
                    spans,
                    StyledSpan::new(start + i, ch.len_utf8(), Category::Bracket),
                );
            }
            prev_is_word = is_word_continue(ch);
        }
    }

    /// Append a span, coalescing with an adjacent span of the same
    /// category. Spans must arrive in increasing order.
    fn push_span(&self, spans: &mut Vec<StyledSpan>, span: StyledSpan) {
        if span.len == 0 {
            return;
        }
        debug_assert!(spans.last().map_or(true, |last| last.end() <= span.start));

        if let Some(last) = spans.last_mut() {
            if last.category == span.category && last.end() == span.start {
                last.len += span.len;
                return;
            }
        }
        spans.push(span);
    }
}

fn is_word_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_word_continue(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

/// First occurrence of `quote` at or after `from` that is not preceded
/// by a backslash. A backslash escapes whatever character follows it.
fn find_unescaped(text: &str, from: usize, quote: char) -> Option<usize> {
    let mut iter = text[from..].char_indices();
    while let Some((i, ch)) = iter.next() {
        if ch == '\\' {
            iter.next();
            continue;
        }
        if ch == quote {
            return Some(from + i);
        }
    }
    None
}

/// First word-bounded run of ASCII digits at or after `from`
fn find_number(text: &str, from: usize) -> Option<(usize, usize)> {
    let mut prev_is_word = text[..from]
        .chars()
        .next_back()
        .is_some_and(is_word_continue);
    let mut iter = text[from..].char_indices().peekable();

    while let Some((i, ch)) = iter.next() {
        if ch.is_ascii_digit() {
            let start = from + i;
            let mut end = start + 1;
            while let Some(&(_, c2)) = iter.peek() {
                if c2.is_ascii_digit() {
                    iter.next();
                    end += 1;
                } else {
                    break;
                }
            }

            let bounded_after = text[end..].chars().next().map_or(true, |c| !is_word_continue(c));
            if !prev_is_word && bounded_after {
                return Some((start, end - start));
            }

            prev_is_word = true;
            continue;
        }
        prev_is_word = is_word_continue(ch);
    }

    None
}

/// First word at or after `from` immediately followed by an opening
/// parenthesis. The span excludes the parenthesis.
fn find_callable(text: &str, from: usize) -> Option<(usize, usize)> {
    let mut prev_is_word = text[..from]
        .chars()
        .next_back()
        .is_some_and(is_word_continue);
    let mut iter = text[from..].char_indices().peekable();

    while let Some((i, ch)) = iter.next() {
        if !prev_is_word && is_word_start(ch) {
            let start = from + i;
            let mut end = start + ch.len_utf8();
            while let Some(&(j, c2)) = iter.peek() {
                if is_word_continue(c2) {
                    end = from + j + c2.len_utf8();
                    iter.next();
                } else {
                    break;
                }
            }

            if text[end..].starts_with('(') {
                return Some((start, end - start));
            }

            prev_is_word = true;
            continue;
        }
        prev_is_word = is_word_continue(ch);
    }

    None
}

/// First word-bounded `self.` at or after `from`
fn find_self_ref(text: &str, from: usize) -> Option<usize> {
    let mut search = from;
    while let Some(i) = text[search..].find(SELF_TOKEN) {
        let pos = search + i;
        let before_ok = text[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_continue(c));
        if before_ok {
            return Some(pos);
        }
        search = pos + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn scanner() -> Scanner {
        Scanner::with_preferences(
            Arc::new(Lexicon::python_default()),
            ScannerPreferences {
                style_brackets: false,
                collect_detailed_metrics: true,
                log_line_statistics: false,
            },
        )
    }

    fn scan(text: &str) -> LineHighlight {
        scanner().highlight_line(text, HighlightState::default())
    }

    #[test]
    fn test_keywords_are_highlighted() {
        let result = scan("if x else y");
        assert_eq!(
            result.spans,
            vec![
                StyledSpan::new(0, 2, Category::Keyword),
                StyledSpan::new(5, 4, Category::Keyword),
            ]
        );
        assert_eq!(result.exiting, HighlightState::default());
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let result = scan("If While");
        assert!(result.spans.is_empty());
    }

    #[test]
    fn test_keyword_requires_word_boundary() {
        // "iffy" contains "if" but is a single word
        let result = scan("iffy");
        assert!(result.spans.is_empty());
    }

    #[test]
    fn test_function_definition() {
        let result = scan("def greet(name):");
        assert_eq!(
            result.spans,
            vec![
                StyledSpan::new(0, 3, Category::Keyword),
                StyledSpan::new(4, 5, Category::FunctionName),
            ]
        );
    }

    #[test]
    fn test_call_is_styled_even_for_keywords() {
        // A word directly followed by ( is a callable, even "print"
        let result = scan("print('hi')");
        assert_eq!(result.spans[0], StyledSpan::new(0, 5, Category::FunctionName));
        assert_eq!(result.spans[1], StyledSpan::new(6, 4, Category::String));
    }

    #[test]
    fn test_class_name_follows_class_keyword() {
        let result = scan("class Foo:");
        assert_eq!(
            result.spans,
            vec![
                StyledSpan::new(0, 5, Category::Keyword),
                StyledSpan::new(6, 3, Category::ClassName),
            ]
        );
        assert!(!result.exiting.pending_class_name);
    }

    #[test]
    fn test_class_with_base_styles_base_as_class_name() {
        // The name before ( is a callable; the pending flag survives
        // and styles the base class instead.
        let result = scan("class Foo(Base):");
        assert_eq!(
            result.spans,
            vec![
                StyledSpan::new(0, 5, Category::Keyword),
                StyledSpan::new(6, 3, Category::FunctionName),
                StyledSpan::new(10, 4, Category::ClassName),
            ]
        );
    }

    #[test]
    fn test_pending_class_name_persists_across_lines() {
        let mut scanner = scanner();
        let first = scanner.highlight_line("class", HighlightState::default());
        assert!(first.exiting.pending_class_name);

        let second = scanner.highlight_line("Foo", first.exiting);
        assert_eq!(second.spans, vec![StyledSpan::new(0, 3, Category::ClassName)]);
        assert!(!second.exiting.pending_class_name);
    }

    #[test]
    fn test_single_quoted_string() {
        let result = scan("x = 'abc'");
        assert_eq!(result.spans, vec![StyledSpan::new(4, 5, Category::String)]);
        assert_eq!(result.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_double_quoted_string() {
        let result = scan("x = \"abc\"");
        assert_eq!(result.spans, vec![StyledSpan::new(4, 5, Category::String)]);
        assert_eq!(result.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_unclosed_single_quote_carries_state() {
        let result = scan("x = 'abc");
        assert_eq!(result.spans, vec![StyledSpan::new(4, 4, Category::String)]);
        assert_eq!(result.exiting.line_state, LineState::InSingleUnclosed);
    }

    #[test]
    fn test_unclosed_state_closes_on_next_line() {
        let mut scanner = scanner();
        let first = scanner.highlight_line("x = \"abc", HighlightState::default());
        assert_eq!(first.exiting.line_state, LineState::InDoubleUnclosed);

        let second = scanner.highlight_line("def\" if", first.exiting);
        assert_eq!(second.spans[0], StyledSpan::new(0, 4, Category::String));
        // Scanning resumes after the closing quote
        assert_eq!(second.spans[1], StyledSpan::new(5, 2, Category::Keyword));
        assert_eq!(second.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        let result = scan("'a\\'b'");
        assert_eq!(result.spans, vec![StyledSpan::new(0, 6, Category::String)]);
        assert_eq!(result.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_backslash_escapes_exactly_one_char() {
        // Double backslash: the second backslash is the escaped char,
        // so the quote after it closes the string.
        let result = scan("'a\\\\'");
        assert_eq!(result.spans, vec![StyledSpan::new(0, 5, Category::String)]);
        assert_eq!(result.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_triple_quote_opens_multiline() {
        let result = scan("x = '''doc");
        assert_eq!(result.spans, vec![StyledSpan::new(4, 6, Category::String)]);
        assert_eq!(result.exiting.line_state, LineState::InTripleSingle);
    }

    #[test]
    fn test_triple_quote_closes_mid_line() {
        let mut scanner = scanner();
        let entering = HighlightState::in_string(LineState::InTripleSingle);
        let result = scanner.highlight_line("still''' y", entering);
        assert_eq!(result.spans, vec![StyledSpan::new(0, 8, Category::String)]);
        assert_eq!(result.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_triple_double_quote_state() {
        let result = scan("s = \"\"\"text");
        assert_eq!(result.exiting.line_state, LineState::InTripleDouble);

        let mut scanner = scanner();
        let closing = scanner.highlight_line("end\"\"\"", result.exiting);
        assert_eq!(closing.spans, vec![StyledSpan::new(0, 6, Category::String)]);
        assert_eq!(closing.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_triple_quote_wins_over_single_at_same_position() {
        let result = scan("'''");
        assert_eq!(result.spans, vec![StyledSpan::new(0, 3, Category::String)]);
        assert_eq!(result.exiting.line_state, LineState::InTripleSingle);
    }

    #[test]
    fn test_empty_triple_string() {
        let result = scan("''''''");
        assert_eq!(result.spans, vec![StyledSpan::new(0, 6, Category::String)]);
        assert_eq!(result.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_empty_line_keeps_unclosed_state() {
        let mut scanner = scanner();
        let entering = HighlightState::in_string(LineState::InSingleUnclosed);
        let result = scanner.highlight_line("", entering);
        assert!(result.spans.is_empty());
        assert_eq!(result.exiting.line_state, LineState::InSingleUnclosed);
    }

    #[test]
    fn test_whole_line_string_in_multiline_state() {
        let mut scanner = scanner();
        let entering = HighlightState::in_string(LineState::InTripleDouble);
        let result = scanner.highlight_line("anything if class", entering);
        assert_eq!(result.spans, vec![StyledSpan::new(0, 17, Category::String)]);
        assert_eq!(result.exiting.line_state, LineState::InTripleDouble);
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let result = scan("x = 1  # count");
        assert_eq!(
            result.spans,
            vec![
                StyledSpan::new(4, 1, Category::Number),
                StyledSpan::new(7, 7, Category::Comment),
            ]
        );
        assert_eq!(result.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_comment_swallows_quotes() {
        let result = scan("# it's fine");
        assert_eq!(result.spans, vec![StyledSpan::new(0, 11, Category::Comment)]);
        assert_eq!(result.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_string_swallows_comment_marker() {
        let result = scan("'a#b'");
        assert_eq!(result.spans, vec![StyledSpan::new(0, 5, Category::String)]);
    }

    #[test]
    fn test_magic_method_beats_callable() {
        let result = scan("def __init__(self):");
        assert_eq!(
            result.spans,
            vec![
                StyledSpan::new(0, 3, Category::Keyword),
                StyledSpan::new(4, 8, Category::MagicMethod),
            ]
        );
    }

    #[test]
    fn test_magic_method_requires_word_boundary() {
        let result = scan("x__init__y");
        assert!(result.spans.is_empty());
    }

    #[test]
    fn test_self_reference() {
        let result = scan("self.name = 1");
        assert_eq!(
            result.spans,
            vec![
                StyledSpan::new(0, 5, Category::SelfReference),
                StyledSpan::new(12, 1, Category::Number),
            ]
        );
    }

    #[test]
    fn test_self_without_dot_is_plain() {
        let result = scan("self = 1");
        assert_eq!(result.spans, vec![StyledSpan::new(7, 1, Category::Number)]);
    }

    #[test]
    fn test_self_reference_requires_boundary() {
        let result = scan("myself.name");
        assert!(result.spans.is_empty());
    }

    #[test]
    fn test_number_word_boundaries() {
        let result = scan("abc123 42 7x");
        assert_eq!(result.spans, vec![StyledSpan::new(7, 2, Category::Number)]);
    }

    #[test]
    fn test_number_after_operator() {
        let result = scan("x=42+7");
        assert_eq!(
            result.spans,
            vec![
                StyledSpan::new(2, 2, Category::Number),
                StyledSpan::new(5, 1, Category::Number),
            ]
        );
    }

    #[test]
    fn test_brackets_styled_when_enabled() {
        let mut scanner = Scanner::with_preferences(
            Arc::new(Lexicon::python_default()),
            ScannerPreferences {
                style_brackets: true,
                collect_detailed_metrics: false,
                log_line_statistics: false,
            },
        );
        let result = scanner.highlight_line("f(x)", HighlightState::default());
        assert_eq!(
            result.spans,
            vec![
                StyledSpan::new(0, 1, Category::FunctionName),
                StyledSpan::new(1, 1, Category::Bracket),
                StyledSpan::new(3, 1, Category::Bracket),
            ]
        );
    }

    #[test]
    fn test_brackets_ignored_by_default() {
        let result = scan("[1]");
        assert_eq!(result.spans, vec![StyledSpan::new(1, 1, Category::Number)]);
    }

    #[test]
    fn test_unicode_line_uses_byte_offsets() {
        let result = scan("s = 'héllo'");
        assert_matches!(
            result.spans.as_slice(),
            [StyledSpan {
                start: 4,
                len: 8,
                category: Category::String
            }]
        );
        assert_eq!(result.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_unicode_identifier_is_a_word() {
        // Alphabetic non-ASCII chars form words, so keywords inside
        // them are not matched.
        let result = scan("ifé");
        assert!(result.spans.is_empty());
    }

    #[test]
    fn test_spans_are_ordered_and_disjoint() {
        let result = scan("def f(x): return self.y + 42  # done");
        let mut last_end = 0;
        for span in &result.spans {
            assert!(span.start >= last_end);
            assert!(span.len > 0);
            last_end = span.end();
        }
    }

    #[test]
    fn test_multiline_round_trip() {
        let mut scanner = scanner();
        let first = scanner.highlight_line("'''abc", HighlightState::default());
        assert_eq!(first.spans, vec![StyledSpan::new(0, 6, Category::String)]);
        assert_eq!(first.exiting.line_state, LineState::InTripleSingle);

        let second = scanner.highlight_line("def'''ghi", first.exiting);
        // "def" here is string content, and "ghi" is a plain word
        assert_eq!(second.spans, vec![StyledSpan::new(0, 6, Category::String)]);
        assert_eq!(second.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_comment_hides_triple_quote() {
        let result = scan("x = 1 # '''not a string'''");
        assert_eq!(
            result.spans,
            vec![
                StyledSpan::new(4, 1, Category::Number),
                StyledSpan::new(6, 20, Category::Comment),
            ]
        );
        assert_eq!(result.exiting.line_state, LineState::Normal);
    }

    #[test]
    fn test_quote_at_end_of_line() {
        let result = scan("s = '");
        assert_eq!(result.spans, vec![StyledSpan::new(4, 1, Category::String)]);
        assert_eq!(result.exiting.line_state, LineState::InSingleUnclosed);
    }

    #[test]
    fn test_empty_line() {
        let result = scan("");
        assert!(result.spans.is_empty());
        assert_eq!(result.exiting, HighlightState::default());
    }

    #[test]
    fn test_empty_lexicon_yields_no_word_spans() {
        let lexicon = Arc::new(Lexicon::new(&[], &[]).unwrap());
        let mut scanner = Scanner::new(lexicon);
        let result = scanner.highlight_line("if __init__ x", HighlightState::default());
        assert!(result.spans.is_empty());
    }

    #[test]
    fn test_metrics_accumulate() {
        let mut scanner = scanner();
        scanner.highlight_line("if x", HighlightState::default());
        scanner.highlight_line("x = 'abc'", HighlightState::default());

        let metrics = scanner.metrics();
        assert_eq!(metrics.lines_scanned, 2);
        assert_eq!(metrics.longest_line, 9);
        assert_eq!(metrics.category_usage.get(&Category::Keyword), Some(&1));
        assert_eq!(metrics.category_usage.get(&Category::String), Some(&1));
    }
}
