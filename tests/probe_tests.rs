use fsguard::{can_create, check_permission};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Sorted names directly under `dir`, for before/after comparisons.
fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn missing_nested_path_under_writable_dir_is_creatable_and_leaves_no_residue() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("existing.txt"), "x").unwrap();
    let before = listing(td.path());

    let target = td.path().join("a").join("b").join("c");
    assert!(can_create(&target));

    assert_eq!(listing(td.path()), before, "probe must not leave directories behind");
    assert!(!td.path().join("a").exists());
}

#[test]
fn existing_directory_is_creatable() {
    let td = tempdir().unwrap();
    assert!(can_create(td.path()));
}

#[test]
fn existing_file_is_not_creatable() {
    let td = tempdir().unwrap();
    let file = td.path().join("file.txt");
    fs::write(&file, "x").unwrap();
    assert!(!can_create(&file));
}

#[test]
fn file_ancestor_blocks_creation() {
    let td = tempdir().unwrap();
    let file = td.path().join("file.txt");
    fs::write(&file, "x").unwrap();
    assert!(!can_create(&file.join("sub").join("deeper")));
    assert!(file.is_file());
}

#[cfg(unix)]
#[test]
fn read_only_ancestor_is_not_creatable() {
    use std::os::unix::fs::PermissionsExt;
    if unsafe { libc::geteuid() } == 0 {
        eprintln!("skipping: running as root");
        return;
    }

    let td = tempdir().unwrap();
    let locked = td.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    assert!(!can_create(&locked.join("child")));
    // No extension: probed as a directory inside the locked one.
    assert!(!check_permission(locked.join("child")));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    assert!(fs::read_dir(&locked).unwrap().next().is_none());
}

#[test]
fn check_permission_on_existing_entries() {
    let td = tempdir().unwrap();
    let file = td.path().join("data.bin");
    fs::write(&file, [1u8, 2, 3]).unwrap();

    assert!(check_permission(&file));
    assert!(check_permission(td.path()));
}

#[cfg(unix)]
#[test]
fn check_permission_rejects_read_only_file() {
    use std::os::unix::fs::PermissionsExt;
    if unsafe { libc::geteuid() } == 0 {
        eprintln!("skipping: running as root");
        return;
    }
    let td = tempdir().unwrap();
    let file = td.path().join("ro.txt");
    fs::write(&file, "x").unwrap();
    fs::set_permissions(&file, fs::Permissions::from_mode(0o444)).unwrap();
    assert!(!check_permission(&file));
}

#[test]
fn check_permission_on_missing_file_probes_its_parent() {
    let td = tempdir().unwrap();
    let before = listing(td.path());

    // Has an extension: treated as a file, so the missing parent chain is probed.
    assert!(check_permission(td.path().join("new").join("report.txt")));
    // No extension: treated as a directory and probed itself.
    assert!(check_permission(td.path().join("newdir")));

    assert_eq!(listing(td.path()), before);
}

#[test]
fn check_permission_rejects_missing_file_below_a_file() {
    let td = tempdir().unwrap();
    let blocker = td.path().join("blocker");
    fs::write(&blocker, "x").unwrap();
    assert!(!check_permission(blocker.join("child.txt")));
}
