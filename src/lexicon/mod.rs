//! Lexicon: the configurable word lists the scanner matches against
//!
//! A lexicon bundles the keyword set, the magic-method list, the
//! comment marker, and the bracket characters. The Python defaults
//! mirror the word lists the editor ships with; custom lexicons can
//! be built programmatically or loaded from TOML.

use crate::config::compile_time;
use crate::logging::codes;
use crate::{log_success, log_warning};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Default keyword list for Python sources. Deliberately includes a
/// handful of builtins (`print`, `abs`, ...) styled as keywords.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "None", "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
    "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
    "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
    "print", "abs", "all", "any", "bin", "bool", "bytearray", "bytes", "chr", "complex", "divmod",
    "enumerate", "float", "format", "frozenset", "hex", "input", "isinstance", "iter",
];

/// Default dunder names styled as magic methods
pub const PYTHON_MAGIC_METHODS: &[&str] = &["__init__", "__str__", "__repr__", "__len__", "__eq__"];

const PYTHON_BRACKETS: &[char] = &['(', ')', '[', ']', '{', '}'];

/// Errors raised while building or loading a lexicon
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse lexicon file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("blank entry in lexicon field '{field}'")]
    BlankEntry { field: &'static str },

    #[error("lexicon entry '{entry}' is {length} bytes, exceeding the maximum")]
    EntryTooLong { entry: String, length: usize },

    #[error("lexicon has {count} entries, exceeding the maximum")]
    TooManyEntries { count: usize },
}

impl LexiconError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            LexiconError::Io(_) => codes::lexicon::LOAD_FAILED,
            LexiconError::Parse(_) => codes::lexicon::PARSE_FAILED,
            LexiconError::BlankEntry { .. } => codes::lexicon::BLANK_ENTRY,
            LexiconError::EntryTooLong { .. } => codes::lexicon::ENTRY_TOO_LONG,
            LexiconError::TooManyEntries { .. } => codes::lexicon::TOO_MANY_ENTRIES,
        }
    }
}

/// Word lists and single-character classes the scanner consults
#[derive(Debug, Clone)]
pub struct Lexicon {
    keywords: HashSet<String>,
    magic_methods: Vec<String>,
    comment_marker: char,
    brackets: Vec<char>,
}

impl Lexicon {
    /// Build a lexicon from plain word lists with the default marker
    /// and brackets
    pub fn new(keywords: &[&str], magic_methods: &[&str]) -> Result<Self, LexiconError> {
        LexiconBuilder::new()
            .keywords(keywords.iter().copied())
            .magic_methods(magic_methods.iter().copied())
            .build()
    }

    /// The lexicon matching the stock Python word lists
    pub fn python_default() -> Self {
        Self {
            keywords: PYTHON_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            magic_methods: PYTHON_MAGIC_METHODS.iter().map(|s| s.to_string()).collect(),
            comment_marker: '#',
            brackets: PYTHON_BRACKETS.to_vec(),
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn magic_methods(&self) -> &[String] {
        &self.magic_methods
    }

    pub fn comment_marker(&self) -> char {
        self.comment_marker
    }

    pub fn is_bracket(&self, ch: char) -> bool {
        self.brackets.contains(&ch)
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// True when neither keywords nor magic methods are present
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.magic_methods.is_empty()
    }

    /// Load a lexicon from a TOML file on disk
    pub fn from_toml_path(path: &Path) -> Result<Self, LexiconError> {
        let content = std::fs::read_to_string(path)?;
        let lexicon = Self::from_toml_str(&content)?;

        log_success!(codes::success::LEXICON_LOADED, "Lexicon loaded",
            "path" => path.display(),
            "keywords" => lexicon.keyword_count(),
            "magic_methods" => lexicon.magic_methods.len()
        );

        Ok(lexicon)
    }

    /// Parse a lexicon from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = toml::from_str(content)?;

        let mut builder = LexiconBuilder::new();
        for keyword in &file.keywords {
            builder = builder.keyword(keyword);
        }
        for method in &file.magic_methods {
            builder = builder.magic_method(method);
        }
        if let Some(marker) = file.comment_marker {
            builder = builder.comment_marker(marker);
        }

        let lexicon = builder.build()?;

        if lexicon.is_empty() {
            log_warning!("Lexicon has no keywords or magic methods");
        }

        Ok(lexicon)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::python_default()
    }
}

/// On-disk TOML shape for custom lexicons
#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    magic_methods: Vec<String>,
    comment_marker: Option<char>,
}

/// Builder validating entries against the compile-time limits
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    keywords: Vec<String>,
    magic_methods: Vec<String>,
    comment_marker: char,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        Self {
            keywords: Vec::new(),
            magic_methods: Vec::new(),
            comment_marker: '#',
        }
    }

    pub fn keyword(mut self, word: &str) -> Self {
        self.keywords.push(word.to_string());
        self
    }

    pub fn keywords<'a, I: IntoIterator<Item = &'a str>>(mut self, words: I) -> Self {
        self.keywords.extend(words.into_iter().map(String::from));
        self
    }

    pub fn magic_method(mut self, method: &str) -> Self {
        self.magic_methods.push(method.to_string());
        self
    }

    pub fn magic_methods<'a, I: IntoIterator<Item = &'a str>>(mut self, methods: I) -> Self {
        self.magic_methods
            .extend(methods.into_iter().map(String::from));
        self
    }

    pub fn comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    pub fn build(self) -> Result<Lexicon, LexiconError> {
        let total = self.keywords.len() + self.magic_methods.len();
        if total > compile_time::lexicon::MAX_LEXICON_ENTRIES {
            return Err(LexiconError::TooManyEntries { count: total });
        }

        for (field, entries) in [
            ("keywords", &self.keywords),
            ("magic_methods", &self.magic_methods),
        ] {
            for entry in entries {
                if entry.trim().is_empty() {
                    return Err(LexiconError::BlankEntry { field });
                }
                if entry.len() > compile_time::lexicon::MAX_ENTRY_LENGTH {
                    return Err(LexiconError::EntryTooLong {
                        entry: entry.clone(),
                        length: entry.len(),
                    });
                }
            }
        }

        // Duplicate magic methods would produce duplicate matches
        let mut magic_methods = Vec::new();
        for method in self.magic_methods {
            if !magic_methods.contains(&method) {
                magic_methods.push(method);
            }
        }

        Ok(Lexicon {
            keywords: self.keywords.into_iter().collect(),
            magic_methods,
            comment_marker: self.comment_marker,
            brackets: PYTHON_BRACKETS.to_vec(),
        })
    }
}
