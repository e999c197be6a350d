//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config`, or the platform config directory)
//! 3. `DUPEFIND_*` environment variables
//! 4. CLI flags, applied by [`Config::merge_cli`]
//!
//! A config file that cannot be parsed is reported and ignored.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::duplicates::{ScanOptions, DEFAULT_LARGE_FILE_THRESHOLD, DEFAULT_PROGRESS_INTERVAL};
use crate::scanner::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DUPEFIND_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Files between progress notices; 0 disables them.
    pub progress_interval: usize,
    /// Log hashing start/elapsed for large files.
    pub report_large_files: bool,
    /// Log total run time at the end.
    pub report_total_time: bool,
    /// Size in bytes above which a file counts as large.
    pub large_file_threshold: u64,
    /// Hashing read size in bytes.
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            report_large_files: true,
            report_total_time: true,
            large_file_threshold: DEFAULT_LARGE_FILE_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::load_from_path(p),
            None => match Self::default_path() {
                Some(p) => Self::load_from_path(p),
                None => Self::load_from_figment(Self::base_figment()),
            },
        }
    }

    /// Load defaults, then `path` (if it exists), then the environment.
    pub fn load_from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Self::env_provider());
        Self::load_from_figment(figment)
    }

    fn base_figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Self::env_provider())
    }

    fn env_provider() -> Env {
        Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"])
    }

    fn load_from_figment(figment: Figment) -> Self {
        match figment.extract::<Config>() {
            Ok(config) => config.validated(),
            Err(e) => {
                log::warn!("Invalid configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn validated(mut self) -> Self {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            log::warn!(
                "chunk_size {} is outside 1..={}, using {}",
                self.chunk_size,
                MAX_CHUNK_SIZE,
                DEFAULT_CHUNK_SIZE
            );
            self.chunk_size = DEFAULT_CHUNK_SIZE;
        }
        self
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dupefind").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply CLI flags on top of the loaded values.
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(interval) = cli.progress_interval {
            self.progress_interval = interval;
        }
        if let Some(threshold) = cli.large_file_threshold {
            self.large_file_threshold = threshold;
        }
        if let Some(chunk) = cli.chunk_size {
            self.chunk_size = chunk;
        }
        if cli.no_large_file_report {
            self.report_large_files = false;
        }
        if cli.no_total_time {
            self.report_total_time = false;
        }
    }

    /// Engine options for these settings.
    #[must_use]
    pub fn to_scan_options(&self) -> ScanOptions {
        ScanOptions::default()
            .with_progress_interval(self.progress_interval)
            .with_report_large_files(self.report_large_files)
            .with_report_total_time(self.report_total_time)
            .with_large_file_threshold(self.large_file_threshold)
            .with_chunk_size(self.chunk_size)
    }
}
