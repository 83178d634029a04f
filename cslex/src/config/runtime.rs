// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Whether to require the .cs extension (user preference, not security)
    pub require_cs_extension: bool,

    /// Whether to enable detailed performance logging (user preference)
    pub enable_performance_logging: bool,

    /// Whether to log debug information for non-C# files
    pub log_non_cs_processing: bool,

    /// Whether to include complexity scores in output
    pub include_complexity_metrics: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_cs_extension: env::var("CSLEX_REQUIRE_CS_EXTENSION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_performance_logging: env::var("CSLEX_ENABLE_PERFORMANCE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_non_cs_processing: env::var("CSLEX_LOG_NON_CS_PROCESSING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_complexity_metrics: env::var("CSLEX_INCLUDE_COMPLEXITY_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalPreferences {
    /// Whether to collect detailed token metrics
    pub collect_detailed_metrics: bool,

    /// Whether to include comments in token counts
    pub include_all_tokens_in_counts: bool,

    /// Whether to log string length statistics
    pub log_string_statistics: bool,

    /// Whether to track scanner mode transition counts
    pub track_mode_transitions: bool,

    /// Whether to show position information in error messages
    pub include_position_in_errors: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var("CSLEX_LEXICAL_DETAILED_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_all_tokens_in_counts: env::var("CSLEX_LEXICAL_INCLUDE_ALL_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_string_statistics: env::var("CSLEX_LEXICAL_LOG_STRING_STATS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            track_mode_transitions: env::var("CSLEX_LEXICAL_TRACK_MODE_TRANSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_position_in_errors: env::var("CSLEX_LEXICAL_INCLUDE_POSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level (within security constraints)
    /// Note: Security events will still be logged regardless of this setting
    pub min_log_level: LogLevel,

    /// Whether to include performance metrics in logs
    pub log_performance_events: bool,

    /// Whether to include detailed security metrics
    pub log_security_metrics: bool,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("CSLEX_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("CSLEX_LOGGING_ENABLE_CONSOLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("CSLEX_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env::var("CSLEX_LOGGING_LOG_PERFORMANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_security_metrics: env::var("CSLEX_LOGGING_LOG_SECURITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            enable_cargo_style_output: env::var("CSLEX_LOGGING_CARGO_STYLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_file_context: env::var("CSLEX_LOGGING_INCLUDE_FILE_CONTEXT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }

    /// Convert from events::LogLevel for compatibility
    pub fn from_events_log_level(level: crate::logging::events::LogLevel) -> Self {
        match level {
            crate::logging::events::LogLevel::Error => LogLevel::Error,
            crate::logging::events::LogLevel::Warning => LogLevel::Warning,
            crate::logging::events::LogLevel::Info => LogLevel::Info,
            crate::logging::events::LogLevel::Debug => LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            file_processor: FileProcessorPreferences::default(),
            lexical: LexicalPreferences::default(),
            logging: LoggingPreferences::default(),
        }
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_CS_EXTENSION: &str = "CSLEX_REQUIRE_CS_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "CSLEX_ENABLE_PERFORMANCE_LOGGING";
    pub const LOG_NON_CS_PROCESSING: &str = "CSLEX_LOG_NON_CS_PROCESSING";
    pub const INCLUDE_COMPLEXITY_METRICS: &str = "CSLEX_INCLUDE_COMPLEXITY_METRICS";

    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "CSLEX_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_INCLUDE_ALL_TOKENS: &str = "CSLEX_LEXICAL_INCLUDE_ALL_TOKENS";
    pub const LEXICAL_LOG_STRING_STATS: &str = "CSLEX_LEXICAL_LOG_STRING_STATS";
    pub const LEXICAL_TRACK_MODE_TRANSITIONS: &str = "CSLEX_LEXICAL_TRACK_MODE_TRANSITIONS";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "CSLEX_LEXICAL_INCLUDE_POSITIONS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "CSLEX_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "CSLEX_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "CSLEX_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "CSLEX_LOGGING_LOG_PERFORMANCE";
    pub const LOGGING_LOG_SECURITY: &str = "CSLEX_LOGGING_LOG_SECURITY";
    pub const LOGGING_CARGO_STYLE: &str = "CSLEX_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "CSLEX_LOGGING_INCLUDE_FILE_CONTEXT";
}
