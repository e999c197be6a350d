//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! The [`Hasher`] reads a file through a buffer of `chunk_size` bytes, so
//! memory use per file is constant no matter how large the file is. A scan
//! allocates that buffer once and lends it to
//! [`Hasher::full_hash_with`] for every file.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// BLAKE3 digest of a file's content.
pub type Hash = [u8; 32];

/// Default read size for streaming hashes.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Largest accepted read size (64 MiB).
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Streaming file hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with the default 4 KiB chunk size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create a hasher that reads `chunk_size` bytes at a time.
    ///
    /// The size is clamped to `1..=MAX_CHUNK_SIZE`.
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.clamp(1, MAX_CHUNK_SIZE),
        }
    }

    /// A zeroed buffer of `chunk_size` bytes for [`full_hash_with`](Self::full_hash_with).
    #[must_use]
    pub fn buffer(&self) -> Vec<u8> {
        vec![0u8; self.chunk_size]
    }

    /// Configured read size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Hash the full content of a file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from opening or reading the file.
    pub fn full_hash(&self, path: &Path) -> io::Result<Hash> {
        self.full_hash_with(path, &mut self.buffer())
    }

    /// Hash a file, reading through the caller's buffer.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from opening or reading the file.
    pub fn full_hash_with(&self, path: &Path, buffer: &mut [u8]) -> io::Result<Hash> {
        let file = File::open(path)?;
        Self::hash_reader_with(file, buffer)
    }

    /// Hash everything a reader produces.
    ///
    /// # Errors
    ///
    /// Returns the first non-`Interrupted` read error.
    pub fn hash_reader<R: Read>(&self, reader: R) -> io::Result<Hash> {
        Self::hash_reader_with(reader, &mut self.buffer())
    }

    fn hash_reader_with<R: Read>(mut reader: R, buffer: &mut [u8]) -> io::Result<Hash> {
        if buffer.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "hash buffer must not be empty",
            ));
        }
        let mut hasher = blake3::Hasher::new();

        loop {
            let bytes_read = match reader.read(buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(*hasher.finalize().as_bytes())
    }
}

/// Lowercase hexadecimal encoding of a hash.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    blake3::Hash::from(*hash).to_hex().to_string()
}
