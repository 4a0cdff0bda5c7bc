//! Event code registry for the highlighter
//!
//! Every log event carries a stable code. The registry maps codes to
//! category, severity, and remediation metadata for diagnostics output.

use std::fmt;

/// A stable event code such as "E010" or "I002"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub mod lexicon {
    use super::Code;

    pub const BLANK_ENTRY: Code = Code::new("E010");
    pub const ENTRY_TOO_LONG: Code = Code::new("E011");
    pub const TOO_MANY_ENTRIES: Code = Code::new("E012");
    pub const LOAD_FAILED: Code = Code::new("E013");
    pub const PARSE_FAILED: Code = Code::new("E014");
}

pub mod highlight {
    use super::Code;

    pub const SPAN_BUDGET_EXCEEDED: Code = Code::new("W020");
    pub const LONG_LINE: Code = Code::new("W021");
}

pub mod document {
    use super::Code;

    pub const LINE_OUT_OF_RANGE: Code = Code::new("E030");
    pub const DOCUMENT_TOO_LARGE: Code = Code::new("E031");
}

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const LEXICON_LOADED: Code = Code::new("I002");
    pub const HIGHLIGHT_COMPLETE: Code = Code::new("I003");
    pub const DOCUMENT_REFRESH_COMPLETE: Code = Code::new("I004");
}

/// Severity classification for registered codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

/// Metadata for a registered event code
#[derive(Debug, Clone, Copy)]
pub struct CodeInfo {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub action: &'static str,
    pub recoverable: bool,
    pub requires_halt: bool,
}

static CODE_REGISTRY: &[CodeInfo] = &[
    CodeInfo {
        code: "E010",
        category: "Lexicon",
        severity: Severity::Medium,
        description: "Lexicon entry is blank or whitespace-only",
        action: "Remove the blank entry from the lexicon source",
        recoverable: true,
        requires_halt: false,
    },
    CodeInfo {
        code: "E011",
        category: "Lexicon",
        severity: Severity::Medium,
        description: "Lexicon entry exceeds the maximum entry length",
        action: "Shorten the offending keyword or magic-method entry",
        recoverable: true,
        requires_halt: false,
    },
    CodeInfo {
        code: "E012",
        category: "Lexicon",
        severity: Severity::Medium,
        description: "Lexicon exceeds the maximum entry count",
        action: "Reduce the number of keywords and magic methods",
        recoverable: true,
        requires_halt: false,
    },
    CodeInfo {
        code: "E013",
        category: "Lexicon",
        severity: Severity::High,
        description: "Lexicon file could not be read",
        action: "Check the lexicon file path and permissions",
        recoverable: true,
        requires_halt: false,
    },
    CodeInfo {
        code: "E014",
        category: "Lexicon",
        severity: Severity::High,
        description: "Lexicon file is not valid TOML",
        action: "Fix the TOML syntax in the lexicon file",
        recoverable: true,
        requires_halt: false,
    },
    CodeInfo {
        code: "W020",
        category: "Highlight",
        severity: Severity::Low,
        description: "A single line produced more spans than the soft budget",
        action: "No action required; spans are kept",
        recoverable: true,
        requires_halt: false,
    },
    CodeInfo {
        code: "W021",
        category: "Highlight",
        severity: Severity::Low,
        description: "Line length exceeds the statistics threshold",
        action: "No action required; scanning remains linear",
        recoverable: true,
        requires_halt: false,
    },
    CodeInfo {
        code: "E030",
        category: "Document",
        severity: Severity::Medium,
        description: "Line index is outside the document",
        action: "Clamp the index to the current line count",
        recoverable: true,
        requires_halt: false,
    },
    CodeInfo {
        code: "E031",
        category: "Document",
        severity: Severity::High,
        description: "Document exceeds the maximum tracked line count",
        action: "Split the document or raise the compile-time limit",
        recoverable: false,
        requires_halt: false,
    },
    CodeInfo {
        code: "ERR001",
        category: "System",
        severity: Severity::Critical,
        description: "Internal invariant violated",
        action: "Report this as a bug",
        recoverable: false,
        requires_halt: true,
    },
    CodeInfo {
        code: "I001",
        category: "System",
        severity: Severity::Low,
        description: "Logging system initialized",
        action: "No specific action available",
        recoverable: true,
        requires_halt: false,
    },
    CodeInfo {
        code: "I002",
        category: "Lexicon",
        severity: Severity::Low,
        description: "Lexicon loaded successfully",
        action: "No specific action available",
        recoverable: true,
        requires_halt: false,
    },
    CodeInfo {
        code: "I003",
        category: "Highlight",
        severity: Severity::Low,
        description: "Highlight pass completed",
        action: "No specific action available",
        recoverable: true,
        requires_halt: false,
    },
    CodeInfo {
        code: "I004",
        category: "Document",
        severity: Severity::Low,
        description: "Document refresh completed",
        action: "No specific action available",
        recoverable: true,
        requires_halt: false,
    },
];

pub fn get_metadata(code: &str) -> Option<&'static CodeInfo> {
    CODE_REGISTRY.iter().find(|info| info.code == code)
}

pub fn get_severity(code: &str) -> Severity {
    get_metadata(code).map(|i| i.severity).unwrap_or(Severity::Medium)
}

pub fn get_category(code: &str) -> &'static str {
    get_metadata(code).map(|i| i.category).unwrap_or("Unknown")
}

pub fn get_description(code: &str) -> &'static str {
    get_metadata(code)
        .map(|i| i.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_metadata(code)
        .map(|i| i.action)
        .unwrap_or("No specific action available")
}

pub fn is_recoverable(code: &str) -> bool {
    get_metadata(code).map(|i| i.recoverable).unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_metadata(code).map(|i| i.requires_halt).unwrap_or(false)
}
