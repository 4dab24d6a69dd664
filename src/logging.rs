//! Tracing initialization.
//! Builds a subscriber with EnvFilter, compact or JSON formatting on stderr, and an
//! optional non-blocking file layer.
//!
//! Behavior:
//! - Log level comes from Settings (already merged from env and CLI).
//! - File logging is refused when the log path or any ancestor is a symlink.

use anyhow::Result;
use chrono::Local;
use fsguard::fs_ops::is_symlink;
use fsguard::output as out;
use fsguard::{LogLevel, Settings};
use std::fmt as stdfmt;
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

fn to_level_filter(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

/// Library events are the interesting ones; dependencies stay at warn.
fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::new(format!("warn,fsguard={}", level.to_string().to_ascii_lowercase()))
}

fn open_file_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if is_symlink(path) {
        out::print_warn(&format!(
            "Refusing to log to '{}': the path or one of its ancestors is a symlink. Logs go to stderr only.",
            path.display()
        ));
        return None;
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let _ = std::fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!(
                "Could not open log file '{}': {}. Logs go to stderr only.",
                path.display(),
                e
            ));
            None
        }
    }
}

/// Initialize tracing. Returns the appender guard when a file layer is active;
/// hold it until exit so buffered lines are flushed.
pub fn init_tracing(settings: &Settings) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(to_level_filter(settings.log_level));
    let file = settings.log_file.as_deref().and_then(open_file_writer);
    let (writer, guard) = match file {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };

    if settings.json {
        let stderr_layer = tsfmt::layer()
            .event_format(tsfmt::format().json())
            .with_timer(LocalHumanTime)
            .with_target(true)
            .with_writer(std::io::stderr);
        let file_layer = writer.map(|w| {
            tsfmt::layer()
                .event_format(tsfmt::format().json())
                .with_timer(LocalHumanTime)
                .with_target(true)
                .with_writer(w)
        });
        registry().with(filter).with(stderr_layer).with(file_layer).try_init()?;
    } else {
        let stderr_layer = tsfmt::layer()
            .compact()
            .with_timer(LocalHumanTime)
            .with_target(false)
            .with_writer(std::io::stderr);
        let file_layer = writer.map(|w| {
            tsfmt::layer()
                .compact()
                .with_timer(LocalHumanTime)
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .with_writer(w)
        });
        registry().with(filter).with(stderr_layer).with(file_layer).try_init()?;
    }

    Ok(guard)
}
