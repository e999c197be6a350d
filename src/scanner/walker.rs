//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and yielding every regular file under it, one path at a time.
//! Traversal is depth-first and single-threaded; children are visited in
//! file-name order so a run is reproducible.
//!
//! # Features
//!
//! - Root validation before the first path is yielded
//! - Unreadable subdirectories are reported and skipped, not fatal
//! - Directory symlinks are never followed
//! - Graceful shutdown via atomic flag
//!
//! # Example
//!
//! ```no_run
//! use dupefind::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default())?;
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} files", files.len());
//! # Ok::<(), dupefind::scanner::PathError>(())
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use walkdir::{DirEntry, WalkDir};

use super::{PathError, ScanError, WalkerConfig};

/// Lazy traversal returned by [`Walker::walk`].
///
/// Ends early, without yielding the pending entry, once the shutdown flag
/// is set; [`was_interrupted`](Self::was_interrupted) then reports `true`.
#[derive(Debug)]
pub struct Walk<'a> {
    walker: &'a Walker,
    entries: walkdir::IntoIter,
    interrupted: bool,
}

impl Walk<'_> {
    /// `true` if the traversal stopped on a shutdown request while entries
    /// were still left. A walk that ran out of entries is never interrupted.
    #[must_use]
    pub fn was_interrupted(&self) -> bool {
        self.interrupted
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<PathBuf, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.interrupted {
            return None;
        }

        loop {
            let entry = self.entries.next()?;

            if self.walker.is_shutdown_requested() {
                log::debug!("Walker: Shutdown requested, stopping iteration");
                self.interrupted = true;
                return None;
            }

            match entry {
                Ok(entry) => {
                    if let Some(path) = self.walker.process_entry(entry) {
                        return Some(Ok(path));
                    }
                }
                Err(e) => return Some(Err(self.walker.handle_walk_error(e))),
            }
        }
    }
}

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] if the root does not exist, is not a
    /// directory, or cannot be listed.
    pub fn new(path: &Path, config: WalkerConfig) -> Result<Self, PathError> {
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PathError::NotFound(path.to_path_buf()),
            _ => PathError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        if !metadata.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }

        std::fs::read_dir(path).map_err(|e| PathError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            root: path.to_path_buf(),
            config,
        })
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.config
            .shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Walk the directory tree, yielding regular file paths.
    ///
    /// Each call starts a fresh traversal. Directory listing failures are
    /// yielded as [`ScanError::SubdirectoryAccess`] and iteration continues
    /// with the next sibling.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            walker: self,
            entries: WalkDir::new(&self.root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter(),
            interrupted: false,
        }
    }

    /// Decide whether a directory entry is a file to yield.
    fn process_entry(&self, entry: DirEntry) -> Option<PathBuf> {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            log::trace!("Entering directory: {}", entry.path().display());
            return None;
        }

        if file_type.is_file() {
            return Some(entry.into_path());
        }

        if file_type.is_symlink() {
            // Only file symlinks with a reachable target count.
            return match std::fs::metadata(entry.path()) {
                Ok(target) if target.is_file() => Some(entry.into_path()),
                Ok(_) => {
                    log::trace!("Skipping non-file symlink: {}", entry.path().display());
                    None
                }
                Err(e) => {
                    log::debug!("Skipping broken symlink {}: {}", entry.path().display(), e);
                    None
                }
            };
        }

        log::trace!("Skipping special file: {}", entry.path().display());
        None
    }

    /// Convert a walkdir error into a recoverable directory error.
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        let source = io::Error::from(error);
        log::debug!("Walker error for {}: {}", path.display(), source);
        ScanError::SubdirectoryAccess { path, source }
    }
}
