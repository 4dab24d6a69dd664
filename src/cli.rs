//! CLI definition and parsing.
//!
//! Notes:
//! - Logging flags are global and override FSGUARD_LOG_LEVEL / FSGUARD_LOG_FILE.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::path::{Path, PathBuf};

use fsguard::{LogLevel, Settings};

/// Crash-safe file operations from the command line.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Crash-safe filesystem primitives")]
pub struct Args {
    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Atomically replace TARGET with --text, the contents of --from, or stdin.
    Save {
        #[arg(value_hint = ValueHint::FilePath)]
        target: PathBuf,
        /// Literal content to write
        #[arg(long, conflicts_with = "from")]
        text: Option<String>,
        /// Copy content from this file
        #[arg(long, value_hint = ValueHint::FilePath)]
        from: Option<PathBuf>,
        /// Skip fsync of the temp file and directory
        #[arg(long)]
        no_sync: bool,
    },
    /// Copy a directory tree, optionally excluding relative subpaths.
    Copy {
        #[arg(value_hint = ValueHint::DirPath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::DirPath)]
        dest: PathBuf,
        /// Relative path (file or directory) to leave out; repeatable
        #[arg(long = "exclude", value_name = "REL_PATH")]
        exclude: Vec<PathBuf>,
    },
    /// Delete directories recursively (symlinks are removed, never followed).
    Delete {
        #[arg(required = true, value_hint = ValueHint::DirPath)]
        dirs: Vec<PathBuf>,
    },
    /// Empty a directory, creating it if missing.
    Clean {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
    },
    /// Report whether PATH is a directory or could be created as one.
    Probe {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
    /// Report whether PATH is readable and writable (or creatable).
    Check {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
    /// Print base name, stem and extension of PATH.
    Name { path: PathBuf },
}

impl Args {
    /// Precedence: --debug > --log-level value > None (keep settings).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides in-place. No-ops for unset flags.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(level) = self.effective_log_level() {
            settings.log_level = level;
        }
        if let Some(file) = &self.log_file {
            settings.log_file = Some(file.clone());
        }
        if self.json {
            settings.json = true;
        }
    }
}

/// Predicate for `copy --exclude`: reject any entry at or below an excluded path.
pub fn exclusion_filter(excluded: &[PathBuf]) -> impl FnMut(&Path) -> bool + '_ {
    move |rel: &Path| !excluded.iter().any(|ex| rel.starts_with(ex))
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_wins_over_log_level() {
        let args = Args::parse_from(["fsguard", "--log-level", "quiet", "-d", "clean", "x"]);
        assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));
    }

    #[test]
    fn overrides_leave_unset_fields_alone() {
        let args = Args::parse_from(["fsguard", "probe", "x"]);
        let mut settings = Settings {
            log_level: LogLevel::Info,
            log_file: Some(PathBuf::from("from-env.log")),
            json: false,
        };
        args.apply_overrides(&mut settings);
        assert_eq!(settings.log_level, LogLevel::Info);
        assert_eq!(settings.log_file, Some(PathBuf::from("from-env.log")));
    }

    #[test]
    fn exclusion_is_component_wise() {
        let excluded = vec![PathBuf::from("skip")];
        let mut keep = exclusion_filter(&excluded);
        assert!(keep(Path::new("")));
        assert!(keep(Path::new("skipper/a.txt")));
        assert!(!keep(Path::new("skip")));
        assert!(!keep(Path::new("skip/inner/a.txt")));
    }

    #[test]
    fn save_text_and_from_conflict() {
        let res = Args::try_parse_from(["fsguard", "save", "t.txt", "--text", "a", "--from", "b"]);
        assert!(res.is_err());
    }
}
