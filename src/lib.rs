//! Core library for `fsguard`.
//!
//! Filesystem primitives that stay correct under partial failure, pre-existing
//! files, symlinks and permission restrictions:
//!
//! - [`atomic_save`]: write a hidden sibling, then rename it over the target.
//! - [`copy_directory_filtered`], [`delete_directory`], [`clean_directory`]:
//!   iterative tree operations that never descend through symlinks when deleting.
//! - [`can_create`] / [`check_permission`]: writability probes that leave nothing
//!   behind.
//!
//! Everything is synchronous and assumes one writer per path. Operations on
//! disjoint paths may run from any number of threads; saves racing on the same
//! path resolve as "last rename wins". [`PathLocks`] is the opt-in way to
//! serialize them within a process. There is no cross-process locking.

pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;

pub use config::{LogLevel, Settings};
pub use errors::{ErrorKind, FsError, Result};
pub use fs_ops::{
    PathGuard, PathLocks, SaveOptions, atomic_save, atomic_save_bytes, atomic_save_text, atomic_save_with,
    batch_delete, can_create, check_permission, clean_directory, clean_directory_quietly, copy_directory,
    copy_directory_filtered, copy_file, delete_directories, delete_directory, delete_directory_quietly,
    force_delete, force_delete_quietly, move_file,
};
