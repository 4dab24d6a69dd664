//! Unix implementation of the platform capabilities.
//! There is no hidden attribute here; hidden-ness is a naming convention only.

use std::ffi::CString;
use std::fs::{self, File};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use super::Platform;

pub struct UnixPlatform;

impl Platform for UnixPlatform {
    fn has_symlinks(&self) -> bool {
        true
    }

    fn is_hidden(&self, _path: &Path) -> io::Result<bool> {
        Ok(false)
    }

    fn set_hidden(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    /// access(2) with R_OK|W_OK: honours the real uid and any ACLs, unlike mode bits.
    fn can_read_write(&self, path: &Path) -> bool {
        let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
            return false;
        };
        unsafe { libc::access(c_path.as_ptr(), libc::R_OK | libc::W_OK) == 0 }
    }

    fn sync_dir(&self, dir: &Path) -> io::Result<()> {
        File::open(dir)?.sync_all()
    }

    fn remove_link(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn read_write_access_follows_mode_bits() {
        if unsafe { libc::geteuid() } == 0 {
            eprintln!("skipping: running as root");
            return;
        }
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, b"x").unwrap();
        assert!(UnixPlatform.can_read_write(&path));

        fs::set_permissions(&path, fs::Permissions::from_mode(0o400)).unwrap();
        assert!(!UnixPlatform.can_read_write(&path));
    }

    #[test]
    fn missing_path_is_not_accessible() {
        let dir = tempdir().unwrap();
        assert!(!UnixPlatform.can_read_write(&dir.path().join("nope")));
    }

    #[test]
    fn remove_link_leaves_target_alone() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), b"keep").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        UnixPlatform.remove_link(&link).unwrap();
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.join("keep.txt").exists());
    }
}
