//! Permission probing.
//!
//! `can_create` answers "could I create this path?" by creating and immediately
//! removing one empty directory below the nearest existing ancestor. It never
//! leaves anything behind: if the probe directory cannot be removed the answer is
//! `false`, since the check was no longer side-effect free.
//!
//! A concurrent probe of the identical path can produce a transient false
//! negative; it cannot produce a false positive.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::classify;
use crate::platform::{self, Platform};

/// Parent used for the ancestor walk. A bare relative name hangs off `.`.
fn parent_of(path: &Path) -> Option<&Path> {
    if path == Path::new(".") {
        return None;
    }
    match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Some(Path::new(".")),
        other => other,
    }
}

/// True if `path` is a directory or could be created as one by this process.
pub fn can_create(path: &Path) -> bool {
    if classify::is_directory(path) {
        return true;
    }
    if classify::exists(path) {
        return false;
    }

    // `probe` is always the missing child of `ancestor` on the way to `path`.
    let mut probe = path;
    let mut current = parent_of(path);
    while let Some(anc) = current {
        if classify::exists(anc) {
            break;
        }
        probe = anc;
        current = parent_of(anc);
    }

    let Some(ancestor) = current else {
        debug!(path = %path.display(), "no existing ancestor");
        return false;
    };
    if !classify::is_directory(ancestor) {
        debug!(path = %path.display(), ancestor = %ancestor.display(), "nearest ancestor is not a directory");
        return false;
    }

    if let Err(e) = fs::create_dir(probe) {
        debug!(probe = %probe.display(), error = %e, "probe directory could not be created");
        return false;
    }
    match fs::remove_dir(probe) {
        Ok(()) => {
            debug!(path = %path.display(), probe = %probe.display(), "create probe succeeded");
            true
        }
        Err(e) => {
            warn!(probe = %probe.display(), error = %e, "probe directory could not be removed");
            false
        }
    }
}

/// Read/write check for an existing path, creation probe for a missing one.
///
/// Existing: true iff it is a regular file or directory that is both readable and
/// writable. Missing: paths with an extension are treated as files and their parent
/// (or `.`) is probed; anything else is probed as a directory itself.
pub fn check_permission(path: impl AsRef<Path>) -> bool {
    check_permission_on(platform::native(), path.as_ref())
}

pub(crate) fn check_permission_on(platform: &dyn Platform, path: &Path) -> bool {
    let text = path.to_string_lossy();
    if text.trim().is_empty() {
        return false;
    }

    if let Ok(meta) = fs::metadata(path) {
        return (meta.is_file() || meta.is_dir()) && platform.can_read_write(path);
    }

    let test_location = if classify::extension(&text).is_empty() {
        path
    } else {
        match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    };
    can_create(test_location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_walk_terminates_at_current_dir() {
        assert_eq!(parent_of(Path::new("a")), Some(Path::new(".")));
        assert_eq!(parent_of(Path::new(".")), None);
        assert_eq!(parent_of(Path::new("/")), None);
        assert_eq!(parent_of(Path::new("/a")), Some(Path::new("/")));
    }

    #[test]
    fn blank_path_is_never_permitted() {
        assert!(!check_permission(""));
        assert!(!check_permission("   "));
    }
}
