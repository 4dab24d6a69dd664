//! Fallback for targets that are neither Unix nor Windows (e.g. WASI).
//! No symlinks, no hidden attribute, no directory fsync.

use std::fs;
use std::io;
use std::path::Path;

use super::Platform;

pub struct PortablePlatform;

impl Platform for PortablePlatform {
    fn has_symlinks(&self) -> bool {
        false
    }

    fn is_hidden(&self, _path: &Path) -> io::Result<bool> {
        Ok(false)
    }

    fn set_hidden(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn can_read_write(&self, path: &Path) -> bool {
        fs::metadata(path)
            .map(|m| !m.permissions().readonly())
            .unwrap_or(false)
    }

    fn sync_dir(&self, _dir: &Path) -> io::Result<()> {
        Ok(())
    }

    fn remove_link(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
