//! Command-line interface definitions for dupefind.
//!
//! # Example
//!
//! ```bash
//! # Scan the current directory
//! dupefind
//!
//! # Scan a directory, reporting progress every 100 files
//! dupefind ~/Downloads --progress-interval 100
//!
//! # Treat files over 500 MiB as large and hash in 64 KiB chunks
//! dupefind ~/Videos --large-file-threshold 500MiB --chunk-size 64KiB
//!
//! # Verbose mode for debugging
//! dupefind -v ~/Downloads
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::scanner::MAX_CHUNK_SIZE;

/// Find duplicate files by size and content hash.
///
/// Duplicate groups are printed to stdout; progress, errors and timing
/// go to stderr.
#[derive(Debug, Parser)]
#[command(name = "dupefind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH", env = "DUPEFIND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report progress every N files (0 disables progress)
    #[arg(long, value_name = "N")]
    pub progress_interval: Option<usize>,

    /// Files larger than this get hashing start/elapsed notices (e.g. 1GiB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub large_file_threshold: Option<u64>,

    /// Read size used while hashing (e.g. 4KiB)
    #[arg(long, value_name = "SIZE", value_parser = parse_chunk_size)]
    pub chunk_size: Option<usize>,

    /// Do not report timing for large files
    #[arg(long)]
    pub no_large_file_report: bool,

    /// Do not report the total run time
    #[arg(long)]
    pub no_total_time: bool,

    /// Log a summary of the scan when it ends
    #[arg(long)]
    pub summary: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupefind::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("1GiB").unwrap(), 1_073_741_824);
/// ```
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Find where the number ends and the suffix begins
    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}

/// Parse a hashing chunk size between 1 byte and 64 MiB.
///
/// # Errors
///
/// Returns an error for anything [`parse_size`] rejects, for zero, and
/// for sizes above [`MAX_CHUNK_SIZE`].
pub fn parse_chunk_size(s: &str) -> Result<usize, String> {
    let bytes = parse_size(s)?;
    if bytes == 0 {
        return Err("Chunk size must be at least 1 byte".to_string());
    }
    match usize::try_from(bytes) {
        Ok(size) if size <= MAX_CHUNK_SIZE => Ok(size),
        _ => Err(format!(
            "Chunk size {bytes} exceeds the maximum of {MAX_CHUNK_SIZE} bytes"
        )),
    }
}
