//! Opt-in, in-process serialization of writers per path.
//!
//! The fs_ops primitives assume a single writer per path and do no locking of
//! their own. Callers that may save the same target from several threads can route
//! those saves through one shared [`PathLocks`]:
//!
//!   let locks = PathLocks::new();
//!   let _guard = locks.lock(&target);
//!   atomic_save_text(&target, "...")?;
//!
//! This is not a cross-process lock and takes no file locks.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use tracing::trace;

use super::atomic::atomic_save;
use crate::errors::Result;

/// Keyed mutex: at most one guard per path at a time.
#[derive(Debug, Default)]
pub struct PathLocks {
    held: Mutex<HashSet<PathBuf>>,
    released: Condvar,
}

/// RAII guard; the path is released when it drops.
#[derive(Debug)]
pub struct PathGuard<'a> {
    locks: &'a PathLocks,
    key: PathBuf,
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        self.locks.held().remove(&self.key);
        self.locks.released.notify_all();
        trace!(path = %self.key.display(), "path lock released");
    }
}

/// Same key for `a/./b.txt`, `a/b.txt` and an absolute spelling, as long as the
/// parent exists to be canonicalized.
fn lock_key(path: &Path) -> PathBuf {
    if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
        let parent = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
        if let Ok(canonical) = dunce::canonicalize(parent) {
            return canonical.join(name);
        }
    }
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the set cannot leave it inconsistent; keep going.
    fn held(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until `path` is free, then hold it.
    pub fn lock(&self, path: &Path) -> PathGuard<'_> {
        let key = lock_key(path);
        let mut held = self.held();
        while held.contains(&key) {
            held = self.released.wait(held).unwrap_or_else(PoisonError::into_inner);
        }
        held.insert(key.clone());
        trace!(path = %key.display(), "path lock acquired");
        PathGuard { locks: self, key }
    }

    /// Hold `path` if nobody else does.
    pub fn try_lock(&self, path: &Path) -> Option<PathGuard<'_>> {
        let key = lock_key(path);
        let mut held = self.held();
        if !held.insert(key.clone()) {
            return None;
        }
        Some(PathGuard { locks: self, key })
    }

    /// [`atomic_save`] while holding the lock for `target`.
    pub fn save<F, E>(&self, target: &Path, producer: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Write) -> std::result::Result<(), E>,
        E: Into<anyhow::Error>,
    {
        let _guard = self.lock(target);
        atomic_save(target, producer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn try_lock_fails_while_held_and_succeeds_after_release() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a.txt");
        let locks = PathLocks::new();

        let guard = locks.lock(&target);
        assert!(locks.try_lock(&target).is_none());
        assert!(locks.try_lock(&dir.path().join("b.txt")).is_some());
        drop(guard);
        assert!(locks.try_lock(&target).is_some());
    }

    #[test]
    fn equivalent_spellings_share_a_key() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("a.txt");
        let dotted = dir.path().join(".").join("a.txt");
        let locks = PathLocks::new();

        let _guard = locks.lock(&plain);
        assert!(locks.try_lock(&dotted).is_none());
    }
}
