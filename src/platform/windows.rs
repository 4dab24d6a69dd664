//! Windows implementation of the platform capabilities.
//!
//! Notes:
//! - The hidden flag is a real file attribute here and is read from the metadata
//!   attributes, then set through SetFileAttributesW.
//! - Access checks only consider the READONLY attribute; ACLs are not evaluated.
//! - Directory fsync is not available through std; it is a no-op.

use std::fs;
use std::io;
use std::iter::once;
use std::os::windows::ffi::OsStrExt;
use std::os::windows::fs::{FileTypeExt, MetadataExt};
use std::path::Path;

use windows_sys::Win32::Storage::FileSystem::{FILE_ATTRIBUTE_HIDDEN, SetFileAttributesW};

use super::Platform;

pub struct WindowsPlatform;

fn to_wide(path: &Path) -> Vec<u16> {
    path.as_os_str().encode_wide().chain(once(0)).collect()
}

impl Platform for WindowsPlatform {
    fn has_symlinks(&self) -> bool {
        true
    }

    fn is_hidden(&self, path: &Path) -> io::Result<bool> {
        let attrs = fs::metadata(path)?.file_attributes();
        Ok(attrs & FILE_ATTRIBUTE_HIDDEN != 0)
    }

    fn set_hidden(&self, path: &Path) -> io::Result<()> {
        let attrs = fs::metadata(path)?.file_attributes();
        let wide = to_wide(path);
        let ok = unsafe { SetFileAttributesW(wide.as_ptr(), attrs | FILE_ATTRIBUTE_HIDDEN) };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn can_read_write(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) => !meta.permissions().readonly(),
            Err(_) => false,
        }
    }

    fn sync_dir(&self, _dir: &Path) -> io::Result<()> {
        Ok(())
    }

    /// Directory symlinks and junctions must be removed with RemoveDirectory.
    fn remove_link(&self, path: &Path) -> io::Result<()> {
        let ftype = fs::symlink_metadata(path)?.file_type();
        if ftype.is_symlink_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        }
    }
}
