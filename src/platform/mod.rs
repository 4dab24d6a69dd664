//! Platform capabilities.
//! OS differences (symlink support, the hidden attribute, access checks, directory
//! fsync, link removal) live behind the [`Platform`] trait so the fs_ops layer
//! never branches on `cfg` itself. The implementation is picked at build time.

use std::io;
use std::path::Path;

mod temp;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;
#[cfg(not(any(unix, windows)))]
mod other;

pub use temp::{is_tmp_save_name, tmp_save_sibling};

/// Filesystem capabilities that differ between operating systems.
pub trait Platform: Send + Sync {
    /// Whether the host exposes symbolic links at all.
    fn has_symlinks(&self) -> bool;

    /// OS-level hidden attribute. Dot-file naming does not count.
    fn is_hidden(&self, path: &Path) -> io::Result<bool>;

    /// Set the OS-level hidden attribute; a no-op where the concept does not exist.
    fn set_hidden(&self, path: &Path) -> io::Result<()>;

    /// True when the current process may both read and write `path`.
    fn can_read_write(&self, path: &Path) -> bool;

    /// Persist directory entry changes (e.g. a rename) made inside `dir`.
    fn sync_dir(&self, dir: &Path) -> io::Result<()>;

    /// Remove a symlink itself, whatever it points at.
    fn remove_link(&self, path: &Path) -> io::Result<()>;
}

#[cfg(unix)]
static NATIVE: unix::UnixPlatform = unix::UnixPlatform;
#[cfg(windows)]
static NATIVE: windows::WindowsPlatform = windows::WindowsPlatform;
#[cfg(not(any(unix, windows)))]
static NATIVE: other::PortablePlatform = other::PortablePlatform;

/// Capabilities of the platform this crate was built for.
pub fn native() -> &'static dyn Platform {
    &NATIVE
}
