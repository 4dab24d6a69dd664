#![cfg(unix)]

use fsguard::ErrorKind;
use fsguard::fs_ops::atomic_save_text;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::tempdir;

#[test]
fn read_only_directory_blocks_save_and_keeps_target() {
    if unsafe { libc::geteuid() } == 0 {
        eprintln!("skipping: running as root");
        return;
    }

    let td = tempdir().unwrap();
    let dir = td.path().join("locked");
    fs::create_dir(&dir).unwrap();
    let target = dir.join("keep.txt");
    fs::write(&target, "original").unwrap();
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

    let err = atomic_save_text(&target, "replacement").unwrap_err();

    fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert_eq!(fs::read_to_string(&target).unwrap(), "original");
    let names: Vec<_> = fs::read_dir(&dir).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(names, vec![std::ffi::OsString::from("keep.txt")]);
}

#[test]
fn save_through_symlinked_target_replaces_the_link() {
    let td = tempdir().unwrap();
    let real = td.path().join("real.txt");
    fs::write(&real, "real").unwrap();
    let link = td.path().join("link.txt");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    atomic_save_text(&link, "via link").unwrap();

    // rename(2) replaces the link entry itself; the old target is untouched.
    assert!(!fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&link).unwrap(), "via link");
    assert_eq!(fs::read_to_string(&real).unwrap(), "real");
}
