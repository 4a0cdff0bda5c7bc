pub mod compile_time {
    pub mod highlight {
        /// Line length above which a per-line statistics warning is emitted.
        /// Scanning stays linear regardless; this only gates diagnostics.
        pub const LONG_LINE_THRESHOLD: usize = 100_000;

        /// Soft budget for spans emitted on a single line.
        /// Exceeding it logs a warning; spans are never dropped.
        pub const MAX_SPANS_PER_LINE: usize = 4_096;
    }

    pub mod lexicon {
        /// Maximum length for a single keyword or magic-method entry
        pub const MAX_ENTRY_LENGTH: usize = 255;

        /// Maximum total entries (keywords + magic methods) in one lexicon
        pub const MAX_LEXICON_ENTRIES: usize = 10_000;
    }

    pub mod document {
        /// Maximum number of lines one document highlighter will track
        pub const MAX_DOCUMENT_LINES: usize = 1_000_000;
    }

    pub mod logging {
        /// Maximum events retained by the in-memory logger
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length before truncation concerns apply
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;
    }
}
