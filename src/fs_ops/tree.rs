//! Recursive directory operations: filtered copy, delete and clean.
//!
//! All traversals are iterative (walkdir keeps its own stack), so tree depth is
//! not bounded by the call stack. Symlinks are never descended during deletion: a
//! link is removed as a single entry and its target is left alone.
//!
//! None of these operations are resumable. If the process dies midway, the
//! destination (copy) or the tree (delete/clean) is left partially modified.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use super::classify;
use super::helpers::{classify_io_error, io_error_with_help, walk_error};
use crate::errors::{FsError, Result};
use crate::platform::{self, Platform};

/// Copy every entry of `src` into `dest`, mirroring relative paths.
pub fn copy_directory(src: &Path, dest: &Path) -> Result<()> {
    copy_directory_filtered(src, dest, |_| true)
}

/// Copy `src` into `dest`, consulting `predicate` with each entry's path relative
/// to `src` (the root itself is the empty path).
///
/// - A directory rejected by the predicate is skipped with its whole subtree, and
///   its mirror is never created.
/// - Accepted directories are created (with missing ancestors) before any of
///   their children are copied.
/// - Accepted files overwrite whatever sits at the destination. A symlink found
///   below `dest` is replaced by the copied entry; its target is never written.
/// - Symlinks are read through when they point at a file; symlinked directories
///   are not descended.
/// - A `dest` equal to `src` or nested inside it is `AlreadyExists`, checked
///   before anything is written.
///
/// Running the same copy twice leaves `dest` in the same state as running it once.
pub fn copy_directory_filtered<P>(src: &Path, dest: &Path, mut predicate: P) -> Result<()>
where
    P: FnMut(&Path) -> bool,
{
    let meta = fs::metadata(src).map_err(io_error_with_help("read copy source", src))?;
    if !meta.is_dir() {
        return Err(FsError::NotADirectory(src.to_path_buf()));
    }
    if let Ok(src_real) = dunce::canonicalize(src)
        && resolve_existing_prefix(dest).starts_with(&src_real)
    {
        return Err(FsError::AlreadyExists {
            path: dest.to_path_buf(),
            context: format!("destination is '{}' or lies inside it", src.display()),
        });
    }

    let platform = platform::native();

    let mut dirs = 0usize;
    let mut files = 0usize;
    let walker = WalkDir::new(src)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
            let keep = predicate(rel);
            if !keep {
                trace!(path = %rel.display(), "excluded by predicate");
            }
            keep
        });

    for item in walker {
        let entry = item.map_err(|e| walk_error("walk copy source", src, e))?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = if rel.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(rel)
        };

        let ftype = entry.file_type();
        let copies_file = ftype.is_file() || (ftype.is_symlink() && entry.path().is_file());
        if (ftype.is_dir() || copies_file) && !rel.as_os_str().is_empty() {
            unlink_dest_symlink(platform, &target)?;
        }
        if ftype.is_dir() {
            fs::create_dir_all(&target).map_err(io_error_with_help("create directory", &target))?;
            dirs += 1;
        } else if copies_file {
            fs::copy(entry.path(), &target).map_err(io_error_with_help("copy file", &target))?;
            files += 1;
        } else {
            debug!(path = %entry.path().display(), "skipping entry that is neither a file nor a directory");
        }
    }

    debug!(src = %src.display(), dest = %dest.display(), dirs, files, "copied directory");
    Ok(())
}

/// Canonical form of `path` as far as it exists, with the missing tail appended.
fn resolve_existing_prefix(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut tail: Vec<&std::ffi::OsStr> = Vec::new();
    let mut current = absolute.as_path();
    loop {
        if let Ok(real) = dunce::canonicalize(current) {
            return tail.iter().rev().fold(real, |acc, name| acc.join(name));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name);
                current = parent;
            }
            _ => return absolute.clone(),
        }
    }
}

/// A symlink already sitting at a copy destination is replaced, never written through.
fn unlink_dest_symlink(platform: &dyn Platform, target: &Path) -> Result<()> {
    match fs::symlink_metadata(target) {
        Ok(meta) if meta.file_type().is_symlink() => {
            platform
                .remove_link(target)
                .map_err(io_error_with_help("replace destination symlink", target))?;
            debug!(path = %target.display(), "removed symlink at copy destination");
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Delete `dir` and everything below it.
///
/// - Missing `dir` (or a dangling link) is a successful no-op.
/// - An existing non-directory is `NotADirectory`.
/// - A symlink to a directory is removed as a single entry; its target survives.
/// - Otherwise the contents are cleaned and the empty directory removed. If any
///   entry could not be deleted, the last such error is returned and `dir` stays.
pub fn delete_directory(dir: &Path) -> Result<()> {
    delete_directory_on(platform::native(), dir)
}

pub(crate) fn delete_directory_on(platform: &dyn Platform, dir: &Path) -> Result<()> {
    let lmeta = match fs::symlink_metadata(dir) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!(path = %dir.display(), "delete: already absent");
            return Ok(());
        }
        Err(e) => return Err(classify_io_error("read metadata", dir, e)),
    };

    if lmeta.file_type().is_symlink() {
        return match fs::metadata(dir) {
            Ok(target) if target.is_dir() => {
                platform
                    .remove_link(dir)
                    .map_err(io_error_with_help("delete symlink", dir))?;
                debug!(path = %dir.display(), "removed directory symlink without descending");
                Ok(())
            }
            Ok(_) => Err(FsError::NotADirectory(dir.to_path_buf())),
            Err(_) => Ok(()),
        };
    }
    if !lmeta.is_dir() {
        return Err(FsError::NotADirectory(dir.to_path_buf()));
    }

    purge_contents(platform, dir)?;
    fs::remove_dir(dir).map_err(io_error_with_help("Unable to delete directory", dir))?;
    debug!(path = %dir.display(), "deleted directory");
    Ok(())
}

/// Empty `dir` while keeping the directory itself.
///
/// A missing `dir` is created (with ancestors) instead: cleaning means "ensure it
/// exists and is empty". Callers that only want emptying should check existence
/// first. Every child is attempted even when some fail; the last failure is
/// returned.
pub fn clean_directory(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => purge_contents(platform::native(), dir),
        Ok(_) => Err(FsError::NotADirectory(dir.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;
            debug!(path = %dir.display(), "clean: created missing directory");
            Ok(())
        }
        Err(e) => Err(classify_io_error("read metadata", dir, e)),
    }
}

/// Post-order removal of everything below `dir`.
///
/// Entries are visited in file-name order. A directory whose subtree had a failure
/// is not attempted (it cannot be empty); the last failure in visit order is the
/// reported error.
fn purge_contents(platform: &dyn Platform, dir: &Path) -> Result<()> {
    let mut last_err: Option<FsError> = None;
    let mut blocked: HashSet<PathBuf> = HashSet::new();
    let mut removed = 0usize;

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .contents_first(true)
        .follow_links(false)
        .sort_by_file_name();

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                if let Some(p) = e.path() {
                    blocked.insert(p.to_path_buf());
                    if let Some(parent) = p.parent() {
                        blocked.insert(parent.to_path_buf());
                    }
                }
                let err = walk_error("list directory", dir, e);
                warn!(error = %err, "could not list directory entry");
                last_err = Some(err);
                continue;
            }
        };

        let path = entry.path();
        let ftype = entry.file_type();
        if ftype.is_dir() && blocked.contains(path) {
            if let Some(parent) = path.parent() {
                blocked.insert(parent.to_path_buf());
            }
            continue;
        }

        let (op, result) = if ftype.is_dir() {
            ("Unable to delete directory", fs::remove_dir(path))
        } else if ftype.is_symlink() {
            ("Unable to delete symlink", platform.remove_link(path))
        } else {
            ("Unable to delete file", fs::remove_file(path))
        };

        match result {
            Ok(()) => {
                removed += 1;
                trace!(path = %path.display(), "removed");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = %path.display(), "entry vanished before removal");
            }
            Err(e) => {
                let err = classify_io_error(op, path, e);
                warn!(error = %err, "could not delete entry");
                if let Some(parent) = path.parent() {
                    blocked.insert(parent.to_path_buf());
                }
                last_err = Some(err);
            }
        }
    }

    debug!(path = %dir.display(), removed, failed = last_err.is_some(), "cleaned directory contents");
    match last_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Delete `path` whatever it is: directories recursively, anything else directly.
///
/// Unlike [`delete_directory`], a path that does not exist is `NotFound`.
pub fn force_delete(path: &Path) -> Result<()> {
    let platform = platform::native();
    if classify::is_directory(path) {
        return delete_directory_on(platform, path);
    }

    let lmeta = fs::symlink_metadata(path);
    let result = match &lmeta {
        Ok(m) if m.file_type().is_symlink() => platform.remove_link(path),
        _ => fs::remove_file(path),
    };
    match result {
        Ok(()) => {
            trace!(path = %path.display(), "deleted");
            Ok(())
        }
        Err(_) if lmeta.is_err() => Err(FsError::not_found(path, "File does not exist")),
        Err(e) => Err(classify_io_error("Unable to delete file", path, e)),
    }
}

/// Delete several directories, stopping at the first failure.
pub fn delete_directories<I, P>(dirs: I) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for dir in dirs {
        delete_directory(dir.as_ref())?;
    }
    Ok(())
}

/// Best-effort removal of many paths. Returns true if every path is gone.
pub fn batch_delete<I, P>(paths: I) -> bool
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut all_ok = true;
    for p in paths {
        let p = p.as_ref();
        let ok = if p.is_file() {
            fs::remove_file(p).is_ok()
        } else {
            delete_directory_quietly(p)
        };
        if !ok {
            debug!(path = %p.display(), "batch delete left entry behind");
        }
        all_ok &= ok;
    }
    all_ok
}

pub fn delete_directory_quietly(dir: &Path) -> bool {
    delete_directory(dir).is_ok()
}

pub fn clean_directory_quietly(dir: &Path) -> bool {
    clean_directory(dir).is_ok()
}

pub fn force_delete_quietly(path: &Path) -> bool {
    force_delete(path).is_ok()
}
