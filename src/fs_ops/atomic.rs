//! Durable save: write a hidden sibling, then rename it over the target.
//!
//! Guarantees:
//! - The target holds either its previous content or the complete new content; it
//!   is never observed truncated or half-written.
//! - Any failure before the rename leaves the target untouched. The temp file is
//!   removed best-effort; a leftover `.<name>.<pid>.<seq>.tmp` is garbage.
//!
//! Limits:
//! - Single writer per path. Two saves racing on the same target both succeed and
//!   the last rename wins. Use [`super::PathLocks`] to serialize in-process.
//! - Atomicity is whatever the host's rename offers. POSIX rename(2) and
//!   MoveFileExW(REPLACE_EXISTING) are atomic on local filesystems; network
//!   filesystems may not be.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::helpers::io_error_with_help;
use crate::errors::{FsError, Result};
use crate::platform::{self, Platform};

/// Knobs for [`atomic_save_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Create missing parent directories of the target.
    pub create_parents: bool,
    /// fsync the temp file before the rename and the directory after it.
    pub sync: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            create_parents: true,
            sync: true,
        }
    }
}

/// Temp path an atomic save of `target` will write to first.
pub fn tmp_save_path(target: &Path) -> PathBuf {
    platform::tmp_save_sibling(target)
}

/// Atomically replace `target` with whatever `producer` writes.
///
/// The producer receives an empty buffered sink; it is flushed, synced and closed
/// here on every exit path. A producer error is reported as
/// [`FsError::Producer`] and the target is left as it was.
pub fn atomic_save<F, E>(target: &Path, producer: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::result::Result<(), E>,
    E: Into<anyhow::Error>,
{
    save_on(platform::native(), target, SaveOptions::default(), producer)
}

pub fn atomic_save_with<F, E>(target: &Path, options: SaveOptions, producer: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::result::Result<(), E>,
    E: Into<anyhow::Error>,
{
    save_on(platform::native(), target, options, producer)
}

pub fn atomic_save_bytes(target: &Path, data: &[u8]) -> Result<()> {
    atomic_save(target, |w| w.write_all(data))
}

pub fn atomic_save_text(target: &Path, text: &str) -> Result<()> {
    atomic_save_bytes(target, text.as_bytes())
}

fn parent_dir(target: &Path) -> &Path {
    match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

pub(crate) fn save_on<F, E>(platform: &dyn Platform, target: &Path, options: SaveOptions, producer: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::result::Result<(), E>,
    E: Into<anyhow::Error>,
{
    if target.file_name().is_none() {
        return Err(FsError::invalid_input(target, "save target has no file name"));
    }
    if target.is_dir() {
        return Err(FsError::IsADirectory(target.to_path_buf()));
    }

    let dir = parent_dir(target);
    if options.create_parents {
        fs::create_dir_all(dir).map_err(io_error_with_help("create parent directory", dir))?;
    }

    let tmp = tmp_save_path(target);
    if let Err(e) = write_temp(&tmp, target, options.sync, producer) {
        discard(&tmp);
        return Err(e);
    }

    propagate_hidden(platform, target, &tmp);

    if let Err(e) = fs::rename(&tmp, target) {
        discard(&tmp);
        return Err(io_error_with_help("replace target with temporary file", target)(e));
    }
    if options.sync
        && let Err(e) = platform.sync_dir(dir)
    {
        // The rename already happened; only durability across power loss is in doubt.
        debug!(dir = %dir.display(), error = %e, "directory fsync failed after rename");
    }

    debug!(path = %target.display(), "saved atomically");
    Ok(())
}

fn write_temp<F, E>(tmp: &Path, target: &Path, sync: bool, producer: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::result::Result<(), E>,
    E: Into<anyhow::Error>,
{
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(tmp)
        .map_err(io_error_with_help("create temporary file", tmp))?;

    let mut writer = BufWriter::new(file);
    producer(&mut writer).map_err(|e| FsError::Producer {
        path: target.to_path_buf(),
        source: e.into(),
    })?;

    let file = writer
        .into_inner()
        .map_err(|e| io_error_with_help("flush temporary file", tmp)(e.into_error()))?;
    if sync {
        file.sync_all().map_err(io_error_with_help("fsync temporary file", tmp))?;
    }
    Ok(())
}

/// Copy the OS hidden attribute from an existing target onto the temp file.
/// Cosmetic only; failures are ignored.
fn propagate_hidden(platform: &dyn Platform, target: &Path, tmp: &Path) {
    match platform.is_hidden(target) {
        Ok(true) => {
            if let Err(e) = platform.set_hidden(tmp) {
                debug!(tmp = %tmp.display(), error = %e, "could not mark temporary file hidden");
            }
        }
        Ok(false) => {}
        Err(e) => trace!(path = %target.display(), error = %e, "hidden attribute unavailable"),
    }
}

fn discard(tmp: &Path) {
    if let Err(e) = fs::remove_file(tmp) {
        trace!(tmp = %tmp.display(), error = %e, "temporary file not removed");
    }
}
