//! Single-file copy and move with up-front conflict checks.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::helpers::{classify_io_error, io_error_with_help};
use crate::errors::{FsError, Result};

/// Both paths resolve to the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Shared validation: source is an existing non-directory, destination differs,
/// destination parent exists, an existing destination is writable.
fn prepare(src: &Path, dest: &Path) -> Result<()> {
    let meta = fs::metadata(src).map_err(|e| classify_io_error("read source", src, e))?;
    if meta.is_dir() {
        return Err(FsError::IsADirectory(src.to_path_buf()));
    }
    if same_file(src, dest) {
        return Err(FsError::AlreadyExists {
            path: dest.to_path_buf(),
            context: format!("source '{}' and destination are the same file", src.display()),
        });
    }
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error_with_help("create destination directory", parent))?;
    }
    if let Ok(existing) = fs::metadata(dest)
        && existing.permissions().readonly()
    {
        return Err(FsError::PermissionDenied {
            path: dest.to_path_buf(),
            context: "destination exists but is read-only".to_string(),
        });
    }
    Ok(())
}

/// Copy `src` to `dest`, creating the destination directory and replacing an
/// existing destination file.
pub fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    prepare(src, dest)?;
    fs::copy(src, dest).map_err(io_error_with_help("copy file", dest))?;
    debug!(src = %src.display(), dest = %dest.display(), "copied file");
    Ok(())
}

/// Move `src` to `dest`: rename when possible, otherwise copy then remove the source.
pub fn move_file(src: &Path, dest: &Path) -> Result<()> {
    prepare(src, dest)?;
    match fs::rename(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "renamed file");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "rename failed, falling back to copy+remove");
            fs::copy(src, dest).map_err(io_error_with_help("copy file", dest))?;
            fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
            Ok(())
        }
    }
}
