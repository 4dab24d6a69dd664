//! Runtime settings for the `fsguard` binary.
//! - LogLevel represents verbosity with simple parsing helpers.
//! - Settings merges defaults, environment and CLI flags (CLI wins).
//!
//! There is no configuration file; the library itself takes options per call.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Overrides the default log level (`quiet`, `normal`, `info`, `debug`).
pub const ENV_LOG_LEVEL: &str = "FSGUARD_LOG_LEVEL";
/// Enables file logging to the given path.
pub const ENV_LOG_FILE: &str = "FSGUARD_LOG_FILE";

/// Program-defined verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Completed operations (default)
    #[default]
    Normal,
    /// Per-operation detail
    Info,
    /// Per-entry tracing
    Debug,
}

impl LogLevel {
    /// Parse common names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Logging settings for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub log_level: LogLevel,
    /// Optional log file (in addition to stderr)
    pub log_file: Option<PathBuf>,
    /// Emit JSON lines instead of compact text
    pub json: bool,
}

impl Settings {
    /// Defaults overlaid with `FSGUARD_LOG_LEVEL` / `FSGUARD_LOG_FILE`.
    /// Unparseable or empty values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();
        if let Some(level) = lookup(ENV_LOG_LEVEL).as_deref().and_then(LogLevel::parse) {
            settings.log_level = level;
        }
        if let Some(file) = lookup(ENV_LOG_FILE).filter(|s| !s.trim().is_empty()) {
            settings.log_file = Some(PathBuf::from(file));
        }
        settings
    }
}
