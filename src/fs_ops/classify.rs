//! Path classification.
//!
//! Pure queries over path metadata and names. Nothing here mutates the filesystem
//! and nothing returns an error: every failure collapses to `false` or `""`.

use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

use crate::platform::{self, Platform};

/// Existing directory (symlinks followed). False for missing paths.
pub fn is_directory(path: &Path) -> bool {
    path.is_dir()
}

/// Existing entry (symlinks followed; a dangling link does not exist).
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// True when `path` is a symlink or sits below a symlinked ancestor.
///
/// The leaf is checked with `symlink_metadata` so the link is never followed;
/// ancestors are detected by comparing the canonical form of the parent with its
/// plain absolute form. Always false on hosts without symlinks.
pub fn is_symlink(path: &Path) -> bool {
    is_symlink_on(platform::native(), path)
}

pub(crate) fn is_symlink_on(platform: &dyn Platform, path: &Path) -> bool {
    if !platform.has_symlinks() {
        return false;
    }
    if is_symlink_leaf(path) {
        return true;
    }

    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return false;
    };
    let (Ok(canonical), Ok(absolute)) = (dunce::canonicalize(parent), std::path::absolute(parent)) else {
        return false;
    };
    let absolute = lexical_normalize(&absolute);
    trace!(canonical = %canonical.display(), absolute = %absolute.display(), "compare parent forms");
    canonical != absolute
}

/// Leaf-only symlink check; never follows the link.
pub fn is_symlink_leaf(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Resolve `.` and `..` without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Text after the last `.` of the final segment ("archive.tar.gz" -> "gz").
///
/// Both `/` and `\` separate segments, so "/a/b.c/d" has no extension.
pub fn extension(name: &str) -> String {
    let last = match name.rfind(is_separator) {
        Some(i) => &name[i + 1..],
        None => name,
    };
    last.rsplit_once('.')
        .map(|(_, ext)| ext.to_string())
        .unwrap_or_default()
}

/// Extension of the final component of `path`.
pub fn extension_of(path: &Path) -> String {
    extension(&base_name(path))
}

/// Everything before the last `.` ("archive.tar.gz" -> "archive.tar").
pub fn name_without_extension(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(name)
        .to_string()
}

/// Final component without its extension.
pub fn name_without_extension_of(path: &Path) -> String {
    name_without_extension(&base_name(path))
}

/// Final component with trailing separators stripped; empty if there is none.
pub fn base_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().trim_end_matches(is_separator).to_string(),
        None => String::new(),
    }
}

/// Like [`base_name`] but returns `candidate` for paths without a final component.
pub fn base_name_or(path: &Path, candidate: &str) -> String {
    if path.file_name().is_none() {
        return candidate.to_string();
    }
    base_name(path)
}

/// Normalize an archive-internal path: drop one trailing separator, ensure a leading `/`.
pub fn normalize_zip_path(path: &str) -> String {
    let trimmed = path
        .strip_suffix('/')
        .or_else(|| path.strip_suffix('\\'))
        .unwrap_or(path);
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_uses_final_segment_only() {
        assert_eq!(extension("archive.tar.gz"), "gz");
        assert_eq!(extension("noext"), "");
        assert_eq!(extension("/a/b.c/d"), "");
        assert_eq!(extension(r"C:\dir.v2\file"), "");
        assert_eq!(extension(""), "");
        assert_eq!(extension("trailing."), "");
    }

    #[test]
    fn lexical_normalize_pops_parent_dirs() {
        assert_eq!(lexical_normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
    }

    #[test]
    fn symlink_check_disabled_without_capability() {
        struct NoLinks;
        impl Platform for NoLinks {
            fn has_symlinks(&self) -> bool {
                false
            }
            fn is_hidden(&self, _: &Path) -> std::io::Result<bool> {
                Ok(false)
            }
            fn set_hidden(&self, _: &Path) -> std::io::Result<()> {
                Ok(())
            }
            fn can_read_write(&self, _: &Path) -> bool {
                true
            }
            fn sync_dir(&self, _: &Path) -> std::io::Result<()> {
                Ok(())
            }
            fn remove_link(&self, _: &Path) -> std::io::Result<()> {
                Ok(())
            }
        }
        assert!(!is_symlink_on(&NoLinks, Path::new("/definitely/anything")));
    }
}
