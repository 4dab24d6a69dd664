//! Plain whole-file read/write helpers.
//!
//! These are NOT crash-safe: `write_*` truncates in place. Use
//! [`super::atomic_save`] when a torn write would matter.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::helpers::io_error_with_help;
use crate::errors::Result;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error_with_help("create parent directory", parent))?;
    }
    Ok(())
}

/// Create or truncate `path` and write `data`.
pub fn write_bytes(path: &Path, data: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, data).map_err(io_error_with_help("write file", path))
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    write_bytes(path, text.as_bytes())
}

/// Append `data`, creating the file (and its parents) if needed.
pub fn append_bytes(path: &Path, data: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error_with_help("open file for append", path))?;
    file.write_all(data).map_err(io_error_with_help("append to file", path))
}

pub fn append_text(path: &Path, text: &str) -> Result<()> {
    append_bytes(path, text.as_bytes())
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(io_error_with_help("read file", path))
}

/// Read a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(io_error_with_help("read file", path))
}
