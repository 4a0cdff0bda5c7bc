//! Logging configuration bridge
//!
//! Resolves runtime logging preferences once and exposes them to the
//! service layer. Preferences are read from the environment on first
//! access unless a test installs its own set.

use crate::config::constants::compile_time;
use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFS: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install explicit preferences (used by tests and the binary entry point).
/// Returns false if preferences were already resolved.
pub fn init_runtime_preferences(prefs: LoggingPreferences) -> bool {
    RUNTIME_PREFS.set(prefs).is_ok()
}

fn prefs() -> &'static LoggingPreferences {
    RUNTIME_PREFS.get_or_init(LoggingPreferences::default)
}

/// Minimum level the global logger should emit
pub fn get_min_log_level() -> LogLevel {
    prefs().min_log_level.to_events_log_level()
}

/// Whether log output should be JSON
pub fn use_structured_logging() -> bool {
    prefs().use_structured_logging
}

/// Whether console logging is enabled at all
pub fn use_console_logging() -> bool {
    prefs().enable_console_logging
}

/// Maximum events retained by in-memory loggers
pub fn get_error_buffer_size() -> usize {
    compile_time::logging::LOG_BUFFER_SIZE
}

/// Validate configuration consistency
pub fn validate_config() -> Result<(), String> {
    if get_error_buffer_size() == 0 {
        return Err("log buffer size must be non-zero".to_string());
    }

    if compile_time::logging::MAX_LOG_MESSAGE_LENGTH == 0 {
        return Err("max log message length must be non-zero".to_string());
    }

    Ok(())
}
