//! io::Error -> FsError adapters.
//!
//! Picks the FsError variant from the io::ErrorKind and builds a message with the
//! operation, the path, a platform-aware hint and the raw OS code.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;

use std::io;
use std::path::Path;

use crate::errors::FsError;

/// Human-friendly message: op + path + hint + os code.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        if let Some(hint) = os_hint(code) {
            msg.push_str(" - ");
            msg.push_str(hint);
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else if let Some(hint) = kind_hint(e.kind()) {
        msg.push_str(" - ");
        msg.push_str(hint);
    }

    msg
}

#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions.",
        libc::EXDEV => "cross-filesystem; atomic rename not possible.",
        libc::EBUSY => "resource busy; another process may hold the path.",
        libc::ENOENT => "path not found; verify it exists.",
        libc::EEXIST => "already exists.",
        libc::ENOTEMPTY => "directory not empty; some entries could not be removed.",
        libc::ENOTDIR => "a path component is not a directory.",
        libc::EISDIR => "is a directory.",
        libc::ENOSPC => "insufficient space on device.",
        libc::EROFS => "read-only filesystem; cannot write here.",
        libc::ELOOP => "too many symbolic link levels; possible symlink cycle.",
        libc::ENAMETOOLONG => "filename or path too long.",
        _ => return None,
    };
    Some(hint)
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        5 => "access denied; check permissions.",                 // ERROR_ACCESS_DENIED
        17 => "not same device; atomic rename not possible.",    // ERROR_NOT_SAME_DEVICE
        32 => "sharing violation; file is in use.",               // ERROR_SHARING_VIOLATION
        2 | 3 => "path not found; verify it exists.",             // FILE/PATH NOT FOUND
        80 | 183 => "already exists.",                            // FILE_EXISTS / ALREADY_EXISTS
        145 => "directory not empty; some entries could not be removed.", // ERROR_DIR_NOT_EMPTY
        112 => "insufficient disk space.",                        // ERROR_DISK_FULL
        19 => "write protected / read-only media.",               // ERROR_WRITE_PROTECT
        206 => "filename or path too long.",                      // ERROR_FILENAME_EXCED_RANGE
        _ => return None,
    };
    Some(hint)
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions."),
        io::ErrorKind::NotFound => Some("path not found; verify it exists."),
        io::ErrorKind::AlreadyExists => Some("already exists."),
        _ => None,
    }
}

/// Convert an io::Error raised by `op` on `path` into the matching FsError variant.
pub(crate) fn classify_io_error(op: &str, path: &Path, e: io::Error) -> FsError {
    let context = build_message(op, path, &e);
    let path = path.to_path_buf();
    match e.kind() {
        io::ErrorKind::NotFound => FsError::NotFound { path, context },
        io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
            FsError::PermissionDenied { path, context }
        }
        io::ErrorKind::AlreadyExists => FsError::AlreadyExists { path, context },
        io::ErrorKind::NotADirectory => FsError::NotADirectory(path),
        io::ErrorKind::IsADirectory => FsError::IsADirectory(path),
        _ => FsError::Io {
            path,
            context,
            source: e,
        },
    }
}

/// Returns a closure suitable for `.map_err(...)`.
pub fn io_error_with_help<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> FsError + 'a {
    move |e: io::Error| classify_io_error(op, path, e)
}

/// Same hints, but keeps the io::Error type (and its kind) for io::Result code paths.
pub fn io_error_with_help_io<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}

/// walkdir errors carry their own path; fall back to the traversal root.
pub(crate) fn walk_error(op: &str, root: &Path, e: walkdir::Error) -> FsError {
    let path = e.path().unwrap_or(root).to_path_buf();
    let io_err: io::Error = e.into();
    classify_io_error(op, &path, io_err)
}
