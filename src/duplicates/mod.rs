//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping files by size and content hash
//! - Tracking which groups hold duplicates
//! - Running a scan end to end with per-file error isolation

pub mod finder;
pub mod groups;

pub use finder::{
    DuplicateFinder, FinderError, ScanOptions, ScanOutcome, ScanSummary,
    DEFAULT_LARGE_FILE_THRESHOLD, DEFAULT_PROGRESS_INTERVAL,
};
pub use groups::{DuplicateKeySet, FileRecord, GroupKey, GroupTable};
