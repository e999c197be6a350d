use dupefind::duplicates::{DuplicateFinder, GroupKey, ScanOptions};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

fn paths_of(outcome: &dupefind::duplicates::ScanOutcome, key: &GroupKey) -> Vec<PathBuf> {
    outcome
        .table
        .get(key)
        .unwrap()
        .iter()
        .map(|f| f.path.clone())
        .collect()
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let outcome = finder.scan(dir.path()).unwrap();

    assert!(outcome.table.is_empty());
    assert!(outcome.duplicates().is_empty());
    assert_eq!(outcome.summary.files_processed, 0);
}

#[test]
fn test_scan_hello_world_scenario() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("a.txt"))
        .unwrap()
        .write_all(b"hello")
        .unwrap();
    File::create(dir.path().join("b.txt"))
        .unwrap()
        .write_all(b"hello")
        .unwrap();
    File::create(dir.path().join("c.txt"))
        .unwrap()
        .write_all(b"world")
        .unwrap();
    File::create(dir.path().join("empty.txt")).unwrap();

    let outcome = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    // One duplicate group: a.txt and b.txt
    assert_eq!(outcome.duplicates().len(), 1);
    let key = *outcome.duplicates().iter().next().unwrap();
    assert_eq!(key.size, 5);
    assert_eq!(
        paths_of(&outcome, &key),
        vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
    );

    // c.txt is a singleton, never reported
    let c_key = outcome.table.key_of(&dir.path().join("c.txt")).unwrap();
    assert_eq!(outcome.table.get(&c_key).unwrap().len(), 1);
    assert!(!outcome.table.is_duplicate(&c_key));

    // empty.txt is in no group at all
    assert!(outcome
        .table
        .key_of(&dir.path().join("empty.txt"))
        .is_none());
    assert_eq!(outcome.table.total_files(), 3);
    assert_eq!(outcome.summary.empty_files, 1);
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("subdir").join("deeper");
    fs::create_dir_all(&sub).unwrap();

    fs::write(dir.path().join("top.txt"), "same content").unwrap();
    fs::write(sub.join("bottom.txt"), "same content").unwrap();

    let outcome = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(outcome.duplicates().len(), 1);
    assert_eq!(outcome.summary.duplicate_files, 1);
    assert_eq!(outcome.summary.reclaimable_space, 12);
}

#[test]
fn test_scan_multiple_copies_one_group() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        fs::write(dir.path().join(format!("copy{i}.bin")), [42u8; 64]).unwrap();
    }

    let outcome = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(outcome.duplicates().len(), 1);
    let key = *outcome.duplicates().iter().next().unwrap();
    assert_eq!(outcome.table.get(&key).unwrap().len(), 5);
    assert_eq!(outcome.summary.duplicate_files, 4);
}

#[test]
fn test_scan_same_size_different_content() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "aaaa").unwrap();
    fs::write(dir.path().join("b.txt"), "bbbb").unwrap();

    let outcome = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert!(outcome.duplicates().is_empty());
    assert_eq!(outcome.table.len(), 2);
}

#[test]
fn test_scan_only_empty_files() {
    let dir = tempdir().unwrap();
    for i in 0..4 {
        File::create(dir.path().join(format!("empty{i}"))).unwrap();
    }

    let outcome = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert!(outcome.table.is_empty());
    assert!(outcome.duplicates().is_empty());
    assert_eq!(outcome.summary.files_processed, 4);
    assert_eq!(outcome.summary.empty_files, 4);
}

#[test]
fn test_scan_independent_of_chunk_size() {
    let dir = tempdir().unwrap();
    let data: Vec<u8> = (0..50_000u32).map(|i| (i % 253) as u8).collect();
    fs::write(dir.path().join("one.bin"), &data).unwrap();
    fs::write(dir.path().join("two.bin"), &data).unwrap();

    let small = DuplicateFinder::new(ScanOptions::default().with_chunk_size(13))
        .scan(dir.path())
        .unwrap();
    let large = DuplicateFinder::new(ScanOptions::default().with_chunk_size(1 << 20))
        .scan(dir.path())
        .unwrap();

    let small_keys: Vec<_> = small.duplicates().iter().copied().collect();
    let large_keys: Vec<_> = large.duplicates().iter().copied().collect();
    assert_eq!(small_keys, large_keys);
    assert_eq!(small_keys.len(), 1);
}

#[test]
fn test_scan_paths_keep_discovery_form() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x.txt"), "dup").unwrap();
    fs::write(dir.path().join("y.txt"), "dup").unwrap();

    let outcome = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    for (_, files) in outcome.table.duplicate_groups() {
        for file in files {
            assert!(file.path.starts_with(dir.path()));
        }
    }
}
