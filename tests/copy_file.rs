use fsguard::ErrorKind;
use fsguard::fs_ops::{copy_file, move_file};
use std::fs;
use tempfile::tempdir;

#[test]
fn copy_creates_destination_dirs_and_overwrites() {
    let td = tempdir().unwrap();
    let src = td.path().join("a.txt");
    fs::write(&src, "payload").unwrap();
    let dest = td.path().join("out").join("b.txt");

    copy_file(&src, &dest).unwrap();
    fs::write(&src, "payload v2").unwrap();
    copy_file(&src, &dest).unwrap();

    assert_eq!(fs::read_to_string(&dest).unwrap(), "payload v2");
    assert!(src.exists());
}

#[test]
fn copy_rejects_missing_directory_and_same_file() {
    let td = tempdir().unwrap();
    let missing = td.path().join("missing.txt");
    let err = copy_file(&missing, &td.path().join("x")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = copy_file(td.path(), &td.path().join("x")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IsADirectory);

    let file = td.path().join("same.txt");
    fs::write(&file, "x").unwrap();
    let dotted = td.path().join(".").join("same.txt");
    let err = copy_file(&file, &dotted).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(fs::read_to_string(&file).unwrap(), "x");
}

#[test]
fn move_relocates_the_file() {
    let td = tempdir().unwrap();
    let src = td.path().join("from.txt");
    fs::write(&src, "moving").unwrap();
    let dest = td.path().join("to").join("dest.txt");

    move_file(&src, &dest).unwrap();

    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "moving");
}

#[test]
fn read_only_destination_is_permission_denied() {
    let td = tempdir().unwrap();
    let src = td.path().join("src.txt");
    fs::write(&src, "new").unwrap();
    let dest = td.path().join("dest.txt");
    fs::write(&dest, "old").unwrap();
    let mut perms = fs::metadata(&dest).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&dest, perms).unwrap();

    let err = copy_file(&src, &dest).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert_eq!(fs::read_to_string(&dest).unwrap(), "old");

    let mut perms = fs::metadata(&dest).unwrap().permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    fs::set_permissions(&dest, perms).unwrap();
}
