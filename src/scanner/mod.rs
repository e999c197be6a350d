//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Sequential, depth-first directory walking using walkdir
//! - Streaming content hashing with BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: BLAKE3 file hashing over a fixed-size buffer
//!
//! # Example
//!
//! ```no_run
//! use dupefind::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default())?;
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! # Ok::<(), dupefind::scanner::PathError>(())
//! ```

pub mod hasher;
pub mod walker;

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

// Re-export main types
pub use hasher::{hash_to_hex, Hash, Hasher, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
pub use walker::{Walk, Walker};

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Optional shutdown flag; iteration stops once it is set.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
}

impl WalkerConfig {
    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }
}

/// The scan root cannot be used. Always fatal.
#[derive(thiserror::Error, Debug)]
pub enum PathError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The directory exists but cannot be listed.
    #[error("Cannot read directory {path}: {source}")]
    Unreadable {
        /// The root path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Recoverable errors encountered while scanning.
///
/// Neither variant stops the scan: the file or directory is skipped
/// and the error is reported.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// A file could not be stat'ed, opened or read.
    #[error("Error processing file {path}: {source}")]
    FileAccess {
        /// Path of the file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be listed during traversal.
    #[error("Cannot read directory {path}: {source}")]
    SubdirectoryAccess {
        /// Path of the directory
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::FileAccess { path, .. } | Self::SubdirectoryAccess { path, .. } => path,
        }
    }

    /// Whether this error concerns a directory rather than a single file.
    #[must_use]
    pub fn is_directory_error(&self) -> bool {
        matches!(self, Self::SubdirectoryAccess { .. })
    }
}
