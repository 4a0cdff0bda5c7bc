//! Configuration module for the highlighter
//!
//! Compile-time limits live in `constants`; user-facing runtime preferences
//! (env-var backed) live in `runtime`.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{DocumentPreferences, LoggingPreferences, ScannerPreferences};
