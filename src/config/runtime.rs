// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerPreferences {
    /// Whether to emit Bracket spans for ()[]{}  in plain text
    pub style_brackets: bool,

    /// Whether to collect per-category span usage metrics
    pub collect_detailed_metrics: bool,

    /// Whether to log per-line length statistics at debug level
    pub log_line_statistics: bool,
}

impl Default for ScannerPreferences {
    fn default() -> Self {
        Self {
            style_brackets: env::var("LINELIGHT_STYLE_BRACKETS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            collect_detailed_metrics: env::var("LINELIGHT_DETAILED_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_line_statistics: env::var("LINELIGHT_LOG_LINE_STATS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPreferences {
    /// Whether to log cascade lengths after each edit
    pub log_cascade_statistics: bool,

    /// Whether to track edit/recompute counts in document metrics
    pub track_recompute_counts: bool,
}

impl Default for DocumentPreferences {
    fn default() -> Self {
        Self {
            log_cascade_statistics: env::var("LINELIGHT_LOG_CASCADE_STATS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            track_recompute_counts: env::var("LINELIGHT_TRACK_RECOMPUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// Runtime log level preference (converted to the logging module's level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn to_events_log_level(self) -> crate::logging::LogLevel {
        match self {
            LogLevel::Error => crate::logging::LogLevel::Error,
            LogLevel::Warning => crate::logging::LogLevel::Warning,
            LogLevel::Info => crate::logging::LogLevel::Info,
            LogLevel::Debug => crate::logging::LogLevel::Debug,
        }
    }

    fn from_env_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warning" | "warn" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Minimum level emitted by the global logger
    pub min_log_level: LogLevel,

    /// Whether log output is JSON (structured) instead of plain text
    pub use_structured_logging: bool,

    /// Whether console logging is enabled at all
    pub enable_console_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var("LINELIGHT_LOG_LEVEL")
                .ok()
                .and_then(|v| LogLevel::from_env_str(&v))
                .unwrap_or(LogLevel::Info),
            use_structured_logging: env::var("LINELIGHT_STRUCTURED_LOGS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("LINELIGHT_CONSOLE_LOGS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_preferences_defaults() {
        let prefs = ScannerPreferences {
            style_brackets: false,
            collect_detailed_metrics: true,
            log_line_statistics: false,
        };
        assert!(!prefs.style_brackets);
        assert!(prefs.collect_detailed_metrics);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_env_str("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_env_str("WARN"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::from_env_str("bogus"), None);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            LogLevel::Error.to_events_log_level(),
            crate::logging::LogLevel::Error
        );
        assert_eq!(
            LogLevel::Debug.to_events_log_level(),
            crate::logging::LogLevel::Debug
        );
    }

    #[test]
    fn test_preferences_serialize_round_trip() {
        let prefs = LoggingPreferences {
            min_log_level: LogLevel::Warning,
            use_structured_logging: true,
            enable_console_logging: false,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        let back: LoggingPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back.min_log_level, LogLevel::Warning);
        assert!(back.use_structured_logging);
        assert!(!back.enable_console_logging);
    }
}
