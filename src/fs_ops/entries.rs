//! Entry creation and listing helpers that answer with a plain bool or list.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

use super::classify;

/// Create `dir` with its ancestors; true if it is a directory afterwards.
pub fn make_directory(dir: &Path) -> bool {
    if let Err(e) = fs::create_dir_all(dir) {
        trace!(path = %dir.display(), error = %e, "create_dir_all failed");
    }
    dir.is_dir()
}

/// Ensure `file` exists, creating parent directories and an empty file if needed.
pub fn make_file(file: &Path) -> bool {
    let Ok(absolute) = std::path::absolute(file) else {
        return false;
    };
    let parent_ok = absolute.parent().is_none_or(make_directory);
    parent_ok
        && (absolute.exists()
            || fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&absolute)
                .is_ok())
}

/// Non-directory entries directly inside `dir` whose extension equals `extension`.
/// An unreadable or missing directory yields an empty list.
pub fn list_files_by_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let Ok(read) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut out: Vec<PathBuf> = read
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| !p.is_dir() && classify::extension_of(p) == extension)
        .collect();
    out.sort();
    out
}
