//! Filesystem operations.
//!
//! - classify: pure path/metadata queries (never error)
//! - probe: side-effect-free writability checks (never error)
//! - tree: filtered copy, delete and clean of directory trees
//! - atomic: temp-sibling + rename durable saves
//!
//! Plus thin helpers (single-file copy/move, plain read/write, entry creation)
//! and an opt-in per-path lock.

mod atomic;
pub mod classify;
mod content;
mod copy;
mod entries;
mod helpers;
mod lock;
mod probe;
mod tree;

pub use atomic::{SaveOptions, atomic_save, atomic_save_bytes, atomic_save_text, atomic_save_with, tmp_save_path};
pub use classify::{
    base_name, base_name_or, exists, extension, extension_of, is_directory, is_symlink, is_symlink_leaf,
    name_without_extension, name_without_extension_of, normalize_zip_path,
};
pub use content::{append_bytes, append_text, read_bytes, read_text, write_bytes, write_text};
pub use copy::{copy_file, move_file};
pub use entries::{list_files_by_extension, make_directory, make_file};
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use lock::{PathGuard, PathLocks};
pub use probe::{can_create, check_permission};
pub use tree::{
    batch_delete, clean_directory, clean_directory_quietly, copy_directory, copy_directory_filtered,
    delete_directories, delete_directory, delete_directory_quietly, force_delete, force_delete_quietly,
};
