//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct, which implements
//! [`ProgressCallback`] by drawing a spinner on stderr that reads
//! `Processed <count> files...`. indicatif draws nothing when stderr is not
//! a terminal; the same message is then logged as a plain line instead.
//! Stdout is never touched, so the report stays clean when redirected.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::scanner::ScanError;

/// Progress callback for a duplicate scan.
///
/// Implement this trait to receive progress updates while files are
/// being processed.
pub trait ProgressCallback: Send + Sync {
    /// Called once before the first file is processed.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory being scanned
    fn on_scan_start(&self, _root: &Path) {}

    /// Called every `progress_interval` processed files.
    ///
    /// # Arguments
    ///
    /// * `processed` - Files processed so far, failures and empty files included
    fn on_progress(&self, processed: usize);

    /// Called for every file or directory that is skipped because of an error.
    fn on_error(&self, error: &ScanError) {
        log::warn!("{}", error);
    }

    /// Called once after the last file.
    ///
    /// # Arguments
    ///
    /// * `processed` - Total files processed
    fn on_scan_end(&self, _processed: usize) {}
}

/// Progress message shown for `count` processed files.
#[must_use]
pub fn progress_message(count: usize) -> String {
    format!("Processed {count} files...")
}

/// Progress reporter using an indicatif spinner on stderr.
pub struct Progress {
    spinner: Mutex<Option<ProgressBar>>,
    quiet: bool,
    draw_target: fn() -> ProgressDrawTarget,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupefind::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self::with_draw_target(quiet, ProgressDrawTarget::stderr)
    }

    fn with_draw_target(quiet: bool, draw_target: fn() -> ProgressDrawTarget) -> Self {
        Self {
            spinner: Mutex::new(None),
            quiet,
            draw_target,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }
}

impl ProgressCallback for Progress {
    fn on_scan_start(&self, root: &Path) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::with_draw_target(None, (self.draw_target)());
        pb.set_style(Self::style());
        pb.set_message(format!("Scanning {}", root.display()));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_progress(&self, processed: usize) {
        if self.quiet {
            return;
        }

        if let Ok(spinner) = self.spinner.lock() {
            match *spinner {
                Some(ref pb) if !pb.is_hidden() => pb.set_message(progress_message(processed)),
                _ => log::info!("{}", progress_message(processed)),
            }
        }
    }

    fn on_error(&self, error: &ScanError) {
        if let Ok(spinner) = self.spinner.lock() {
            if let Some(ref pb) = *spinner {
                pb.suspend(|| log::warn!("{}", error));
                return;
            }
        }
        log::warn!("{}", error);
    }

    fn on_scan_end(&self, processed: usize) {
        if self.quiet {
            return;
        }

        if let Ok(mut spinner) = self.spinner.lock() {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
                log::debug!("{}", progress_message(processed));
            }
        }
    }
}
