//! Typed error definitions for fsguard.
//! Every failure carries a kind callers can match on and the path it concerns.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T, E = FsError> = std::result::Result<T, E>;

/// Coarse classification of an [`FsError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    NotADirectory,
    IsADirectory,
    AlreadyExists,
    PermissionDenied,
    Io,
    Producer,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::NotADirectory => "not_a_directory",
            ErrorKind::IsADirectory => "is_a_directory",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::Io => "io",
            ErrorKind::Producer => "producer",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum FsError {
    #[error("Path not found: {path}: {context}")]
    NotFound { path: PathBuf, context: String },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Is a directory: {0}")]
    IsADirectory(PathBuf),

    #[error("Already exists: {path}: {context}")]
    AlreadyExists { path: PathBuf, context: String },

    #[error("Permission denied on {path}: {context}")]
    PermissionDenied { path: PathBuf, context: String },

    #[error("{context}")]
    Io {
        path: PathBuf,
        context: String,
        #[source]
        source: io::Error,
    },

    /// The caller-supplied producer of an atomic save failed; the target was not touched.
    #[error("Producer failed while writing {path}: {source}")]
    Producer {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl FsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::NotFound { .. } => ErrorKind::NotFound,
            FsError::NotADirectory(_) => ErrorKind::NotADirectory,
            FsError::IsADirectory(_) => ErrorKind::IsADirectory,
            FsError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            FsError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            FsError::Io { .. } => ErrorKind::Io,
            FsError::Producer { .. } => ErrorKind::Producer,
        }
    }

    /// Stable numeric code, used as a structured log field by the CLI.
    pub fn code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotFound => 2,
            ErrorKind::NotADirectory => 20,
            ErrorKind::IsADirectory => 21,
            ErrorKind::AlreadyExists => 17,
            ErrorKind::PermissionDenied => 13,
            ErrorKind::Io => 5,
            ErrorKind::Producer => 64,
        }
    }

    /// The path the failure concerns.
    pub fn path(&self) -> &Path {
        match self {
            FsError::NotFound { path, .. }
            | FsError::AlreadyExists { path, .. }
            | FsError::PermissionDenied { path, .. }
            | FsError::Io { path, .. }
            | FsError::Producer { path, .. } => path,
            FsError::NotADirectory(path) | FsError::IsADirectory(path) => path,
        }
    }

    pub(crate) fn not_found(path: &Path, context: impl Into<String>) -> Self {
        FsError::NotFound {
            path: path.to_path_buf(),
            context: context.into(),
        }
    }

    pub(crate) fn invalid_input(path: &Path, context: &str) -> Self {
        FsError::Io {
            path: path.to_path_buf(),
            context: format!("{} '{}'", context, path.display()),
            source: io::Error::new(io::ErrorKind::InvalidInput, context.to_string()),
        }
    }
}
