use dupefind::duplicates::DuplicateFinder;
use std::fs;
use tempfile::tempdir;

#[cfg(unix)]
#[test]
fn test_file_symlink_counts_as_file() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    fs::write(&original, "linked content").unwrap();
    symlink(&original, dir.path().join("symlink.txt")).unwrap();

    let outcome = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    // The link resolves to identical content, so both paths group together
    assert_eq!(outcome.duplicates().len(), 1);
    let (_, files) = outcome.table.duplicate_groups().next().unwrap();
    assert_eq!(files.len(), 2);
}

#[cfg(unix)]
#[test]
fn test_directory_symlink_not_followed() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    let real = dir.path().join("real");
    fs::create_dir(&real).unwrap();
    fs::write(real.join("only.txt"), "single").unwrap();
    symlink(&real, dir.path().join("alias")).unwrap();

    let outcome = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert!(outcome.duplicates().is_empty());
    assert_eq!(outcome.summary.files_processed, 1);
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_terminates() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("file.txt"), "content").unwrap();
    symlink(dir.path(), sub.join("loop")).unwrap();

    let outcome = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(outcome.summary.files_processed, 1);
    assert!(outcome.summary.errors.is_empty());
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_ignored() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real.txt"), "content").unwrap();
    symlink(dir.path().join("gone.txt"), dir.path().join("dangling.txt")).unwrap();

    let outcome = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(outcome.summary.files_processed, 1);
    assert!(outcome.summary.errors.is_empty());
}

#[test]
fn test_hardlinks_are_reported_as_duplicates() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    fs::write(&original, "identical content").unwrap();

    if let Err(e) = fs::hard_link(&original, dir.path().join("hardlink.txt")) {
        eprintln!("Skipping hardlink test: failed to create hardlink: {}", e);
        return;
    }

    let outcome = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    // No inode tracking: two paths, same content, one group
    assert_eq!(outcome.duplicates().len(), 1);
}
