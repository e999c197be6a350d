//! Duplicate grouping by size and content hash.
//!
//! # Overview
//!
//! Every scanned file becomes a [`FileRecord`]. Records are filed in a
//! [`GroupTable`] under their [`GroupKey`], the pair of size and content
//! hash. The [`DuplicateKeySet`] remembers, in order, every key that has
//! collected a second record.
//!
//! # Example
//!
//! ```
//! use dupefind::duplicates::{FileRecord, GroupTable};
//! use std::path::PathBuf;
//!
//! let mut table = GroupTable::new();
//! let hash = [1u8; 32];
//!
//! assert!(!table.insert(FileRecord::new(PathBuf::from("/a.txt"), 5, hash)));
//! assert!(table.insert(FileRecord::new(PathBuf::from("/b.txt"), 5, hash)));
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.total_files(), 2);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::scanner::{hash_to_hex, Hash};

/// Grouping key: file size plus content hash.
///
/// Displays as `<size>:<hex hash>`. The separator cannot occur in either a
/// decimal size or a hex digest, so distinct keys never render the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    /// File size in bytes
    pub size: u64,
    /// Content hash
    pub hash: Hash,
}

impl GroupKey {
    /// Create a key from a size and hash.
    #[must_use]
    pub fn new(size: u64, hash: Hash) -> Self {
        Self { size, hash }
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.size, self.hash_hex())
    }
}

/// One successfully scanned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path as discovered by the walker
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// BLAKE3 hash of the full content
    pub hash: Hash,
}

impl FileRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, hash: Hash) -> Self {
        Self { path, size, hash }
    }

    /// Key this record is grouped under.
    #[must_use]
    pub fn key(&self) -> GroupKey {
        GroupKey::new(self.size, self.hash)
    }
}

/// Keys with two or more records, in the order they reached two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateKeySet {
    keys: Vec<GroupKey>,
}

impl DuplicateKeySet {
    /// Number of duplicate groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no duplicates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in the order they became duplicates.
    pub fn iter(&self) -> impl Iterator<Item = &GroupKey> {
        self.keys.iter()
    }

    fn mark(&mut self, key: GroupKey) {
        self.keys.push(key);
    }
}

impl<'a> IntoIterator for &'a DuplicateKeySet {
    type Item = &'a GroupKey;
    type IntoIter = std::slice::Iter<'a, GroupKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// Records grouped by key, plus the running set of duplicate keys.
///
/// Every present key holds at least one record; records keep discovery order.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    groups: HashMap<GroupKey, Vec<FileRecord>>,
    duplicates: DuplicateKeySet,
}

impl GroupTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to its group.
    ///
    /// Returns `true` when this insertion turned the group into a duplicate
    /// group, i.e. the group now holds exactly two records. Later insertions
    /// into the same group return `false`.
    pub fn insert(&mut self, record: FileRecord) -> bool {
        let key = record.key();
        let files = self.groups.entry(key).or_default();
        files.push(record);

        if files.len() == 2 {
            self.duplicates.mark(key);
            true
        } else {
            false
        }
    }

    /// Records stored under `key`.
    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&[FileRecord]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Whether `key` holds two or more records.
    #[must_use]
    pub fn is_duplicate(&self, key: &GroupKey) -> bool {
        self.groups.get(key).is_some_and(|files| files.len() >= 2)
    }

    /// Find the group holding `path`, if any.
    #[must_use]
    pub fn key_of(&self, path: &Path) -> Option<GroupKey> {
        self.groups
            .iter()
            .find(|(_, files)| files.iter().any(|f| f.path == path))
            .map(|(key, _)| *key)
    }

    /// Number of groups, singletons included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no file was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of recorded files across all groups.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Keys that hold two or more records.
    #[must_use]
    pub fn duplicate_keys(&self) -> &DuplicateKeySet {
        &self.duplicates
    }

    /// Duplicate groups in the order they were completed.
    pub fn duplicate_groups(&self) -> impl Iterator<Item = (&GroupKey, &[FileRecord])> {
        self.duplicates
            .iter()
            .filter_map(move |key| self.get(key).map(|files| (key, files)))
    }

    /// All groups in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[FileRecord])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Copies beyond the first in every duplicate group.
    #[must_use]
    pub fn duplicate_files(&self) -> usize {
        self.duplicate_groups()
            .map(|(_, files)| files.len() - 1)
            .sum()
    }

    /// Bytes freed by keeping one file per duplicate group.
    #[must_use]
    pub fn reclaimable_space(&self) -> u64 {
        self.duplicate_groups()
            .map(|(key, files)| key.size * (files.len() as u64 - 1))
            .sum()
    }
}
