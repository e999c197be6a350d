//! Duplicate finder: a single streaming pass over the tree.
//!
//! # Overview
//!
//! [`DuplicateFinder::scan`] pulls one path at a time from the
//! [`Walker`](crate::scanner::Walker), stats it, hashes it when it is not
//! empty, and files the result in a [`GroupTable`]. A file that cannot be
//! read is logged and skipped; only an unusable root aborts the scan.
//!
//! # Example
//!
//! ```no_run
//! use dupefind::duplicates::{DuplicateFinder, ScanOptions};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(ScanOptions::default());
//! let outcome = finder.scan(Path::new("."))?;
//!
//! for (key, files) in outcome.table.duplicate_groups() {
//!     println!("{key}: {} copies", files.len());
//! }
//! # Ok::<(), dupefind::duplicates::FinderError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use super::groups::{DuplicateKeySet, FileRecord, GroupTable};
use crate::progress::ProgressCallback;
use crate::scanner::{
    Hasher, PathError, ScanError, Walker, WalkerConfig, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE,
};

/// Files above this size get start/finish timing notices by default (1 GiB).
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 1024 * 1024 * 1024;

/// Default number of files between progress notifications.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 37;

/// Options for a duplicate scan.
///
/// The toggles only affect diagnostics; grouping is identical for every
/// combination.
#[derive(Clone)]
pub struct ScanOptions {
    /// Notify progress every N processed files; 0 disables it.
    pub progress_interval: usize,
    /// Log start and elapsed time for files above `large_file_threshold`.
    pub report_large_files: bool,
    /// Log the total run time once the report is out. Read by the caller.
    pub report_total_time: bool,
    /// Size in bytes above which a file counts as large.
    pub large_file_threshold: u64,
    /// Read size for hashing.
    pub chunk_size: usize,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for ScanOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanOptions")
            .field("progress_interval", &self.progress_interval)
            .field("report_large_files", &self.report_large_files)
            .field("report_total_time", &self.report_total_time)
            .field("large_file_threshold", &self.large_file_threshold)
            .field("chunk_size", &self.chunk_size)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            progress_interval: 0,
            report_large_files: true,
            report_total_time: false,
            large_file_threshold: DEFAULT_LARGE_FILE_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl ScanOptions {
    /// Set the progress interval (0 disables progress).
    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Enable or disable large-file timing notices.
    #[must_use]
    pub fn with_report_large_files(mut self, enabled: bool) -> Self {
        self.report_large_files = enabled;
        self
    }

    /// Enable or disable the total time notice.
    #[must_use]
    pub fn with_report_total_time(mut self, enabled: bool) -> Self {
        self.report_total_time = enabled;
        self
    }

    /// Set the large-file threshold in bytes.
    #[must_use]
    pub fn with_large_file_threshold(mut self, bytes: u64) -> Self {
        self.large_file_threshold = bytes;
        self
    }

    /// Set the hashing chunk size in bytes, clamped to `1..=MAX_CHUNK_SIZE`.
    #[must_use]
    pub fn with_chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.clamp(1, MAX_CHUNK_SIZE);
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Statistics from a scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Files pulled from the walker (recorded, empty and failed)
    pub files_processed: usize,
    /// Files hashed and recorded in the table
    pub files_recorded: usize,
    /// Zero-byte files skipped
    pub empty_files: usize,
    /// Files skipped because they could not be read
    pub failed_files: usize,
    /// Directories that could not be listed
    pub directory_errors: usize,
    /// Bytes read while hashing
    pub bytes_hashed: u64,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Copies beyond the first across all duplicate groups
    pub duplicate_files: usize,
    /// Bytes freed by keeping one file per group
    pub reclaimable_space: u64,
    /// Wall-clock time of the whole scan
    pub scan_duration: Duration,
    /// Whether the scan stopped early on a shutdown request
    pub interrupted: bool,
    /// Every recoverable error, in the order it happened
    pub errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }

    /// Whether any file or directory was skipped because of an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of a completed (or interrupted) scan.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Every recorded file, grouped by size and hash
    pub table: GroupTable,
    /// Statistics and recoverable errors
    pub summary: ScanSummary,
}

impl ScanOutcome {
    /// Keys with two or more files, in completion order.
    #[must_use]
    pub fn duplicates(&self) -> &DuplicateKeySet {
        self.table.duplicate_keys()
    }
}

/// Errors that stop a scan.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The scan was cancelled before it started.
    #[error("Scan interrupted by user")]
    Interrupted,

    /// The root path cannot be scanned.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Per-scan mutable state.
///
/// Lives only for one [`DuplicateFinder::scan`] call. The hash buffer is
/// allocated once here and reused for every file.
struct ScanSession {
    table: GroupTable,
    summary: ScanSummary,
    buffer: Vec<u8>,
}

impl ScanSession {
    fn new(hasher: &Hasher) -> Self {
        Self {
            table: GroupTable::default(),
            summary: ScanSummary::default(),
            buffer: hasher.buffer(),
        }
    }

    fn record_error(&mut self, error: ScanError) {
        if error.is_directory_error() {
            self.summary.directory_errors += 1;
        } else {
            self.summary.failed_files += 1;
        }
        self.summary.errors.push(error);
    }

    fn finish(mut self, duration: Duration) -> ScanOutcome {
        self.summary.files_recorded = self.table.total_files();
        self.summary.duplicate_groups = self.table.duplicate_keys().len();
        self.summary.duplicate_files = self.table.duplicate_files();
        self.summary.reclaimable_space = self.table.reclaimable_space();
        self.summary.scan_duration = duration;
        ScanOutcome {
            table: self.table,
            summary: self.summary,
        }
    }
}

/// Duplicate finder that runs the walk-hash-group pipeline.
#[derive(Debug, Clone, Default)]
pub struct DuplicateFinder {
    options: ScanOptions,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a finder with the given options.
    #[must_use]
    pub fn new(options: ScanOptions) -> Self {
        let hasher = Hasher::with_chunk_size(options.chunk_size);
        Self { options, hasher }
    }

    /// Create a finder with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ScanOptions::default())
    }

    /// Options this finder was built with.
    #[must_use]
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan `root` and group every non-empty file by size and hash.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Path`] if the root is missing, not a
    /// directory or unreadable; nothing is scanned in that case. Returns
    /// [`FinderError::Interrupted`] if shutdown was requested before the
    /// scan began. A shutdown during the scan is not an error: the partial
    /// result comes back with `summary.interrupted` set.
    pub fn scan(&self, root: &Path) -> Result<ScanOutcome, FinderError> {
        let start_time = Instant::now();

        if self.options.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        let mut walker_config = WalkerConfig::default();
        if let Some(ref flag) = self.options.shutdown_flag {
            walker_config = walker_config.with_shutdown_flag(Arc::clone(flag));
        }
        let walker = Walker::new(root, walker_config)?;

        log::info!("Starting duplicate scan of {}", root.display());
        if let Some(ref callback) = self.options.progress_callback {
            callback.on_scan_start(root);
        }

        let mut session = ScanSession::new(&self.hasher);
        let mut walk = walker.walk();

        for item in walk.by_ref() {
            match item {
                Ok(path) => self.process_path(&mut session, path),
                Err(e) => self.report_error(&mut session, e),
            }
        }

        // Only a walk cut short counts; a request after the last file does not
        if walk.was_interrupted() {
            log::warn!(
                "Scan interrupted after {} files",
                session.summary.files_processed
            );
            session.summary.interrupted = true;
        }

        if let Some(ref callback) = self.options.progress_callback {
            callback.on_scan_end(session.summary.files_processed);
        }

        let outcome = session.finish(start_time.elapsed());
        log::info!(
            "Scan complete: {} files processed, {} duplicate groups in {:.2?}",
            outcome.summary.files_processed,
            outcome.summary.duplicate_groups,
            outcome.summary.scan_duration
        );
        Ok(outcome)
    }

    /// Count one walked file, process it, and file the result.
    fn process_path(&self, session: &mut ScanSession, path: PathBuf) {
        session.summary.files_processed += 1;
        self.notify_progress(session.summary.files_processed);

        match self.process_file(path, &mut session.buffer) {
            Ok(Some(record)) => {
                session.summary.bytes_hashed += record.size;
                let key = record.key();
                if session.table.insert(record) {
                    log::debug!("New duplicate group: {}", key);
                }
            }
            Ok(None) => session.summary.empty_files += 1,
            Err(e) => self.report_error(session, e),
        }
    }

    /// Log a recoverable error and keep it in the summary.
    fn report_error(&self, session: &mut ScanSession, error: ScanError) {
        match self.options.progress_callback {
            Some(ref callback) => callback.on_error(&error),
            None => log::warn!("{}", error),
        }
        session.record_error(error);
    }

    fn notify_progress(&self, processed: usize) {
        let interval = self.options.progress_interval;
        if interval == 0 || processed % interval != 0 {
            return;
        }
        if let Some(ref callback) = self.options.progress_callback {
            callback.on_progress(processed);
        }
    }

    /// Stat and hash one file.
    ///
    /// Returns `Ok(None)` for empty files, which never join a group.
    fn process_file(
        &self,
        path: PathBuf,
        buffer: &mut [u8],
    ) -> Result<Option<FileRecord>, ScanError> {
        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(source) => return Err(ScanError::FileAccess { path, source }),
        };

        let size = metadata.len();
        if size == 0 {
            log::debug!("Skipping empty file: {}", path.display());
            return Ok(None);
        }

        let large = self.options.report_large_files && size > self.options.large_file_threshold;
        if large {
            log::info!(
                "Hashing large file {} ({})",
                path.display(),
                ByteSize::b(size)
            );
        }

        let hash_start = Instant::now();
        let hash = match self.hasher.full_hash_with(&path, buffer) {
            Ok(h) => h,
            Err(source) => return Err(ScanError::FileAccess { path, source }),
        };

        if large {
            log::info!(
                "Hashed large file {} in {:.2?}",
                path.display(),
                hash_start.elapsed()
            );
        }

        log::trace!("Hashed {}", path.display());
        Ok(Some(FileRecord::new(path, size, hash)))
    }
}
