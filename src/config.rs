//! Configuration types for combine runs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default read/write buffer size: 8 MiB
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Main configuration for a combine run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineConfig {
    /// Read/write buffer size in bytes (must be positive)
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Render a progress bar while combining
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Overwrite an existing output file without prompting
    #[serde(default)]
    pub assume_yes: bool,

    /// Log level for diagnostic output
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file path (None = stderr)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (shorthand for log_level = debug)
    #[serde(default)]
    pub verbose: bool,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            show_progress: true,
            assume_yes: false,
            log_level: LogLevel::default(),
            log_file: None,
            verbose: false,
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    Warn,

    /// Info, warnings, and errors
    #[default]
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CombineConfig::default();
        assert_eq!(config.buffer_size, 8 * 1024 * 1024);
        assert!(config.show_progress);
        assert!(!config.assume_yes);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_file.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: CombineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
        assert!(config.show_progress);
        assert!(!config.assume_yes);
    }

    #[test]
    fn test_log_level_round_trip() {
        let json = serde_json::to_string(&LogLevel::Debug).unwrap();
        assert_eq!(json, "\"debug\"");
        let level: LogLevel = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(level, LogLevel::Warn);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Info.to_tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
    }
}
