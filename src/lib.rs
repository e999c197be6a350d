//! dupefind - Duplicate File Finder
//!
//! Walks a directory tree, groups every non-empty file by size and BLAKE3
//! content hash, and reports the groups with more than one member.
//! Unreadable files and directories are reported and skipped; only an
//! unusable root path stops the scan.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod signal;

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

use cli::Cli;
use config::Config;
use duplicates::{DuplicateFinder, ScanSummary};
use error::ExitCode;
use progress::Progress;

/// Run dupefind with parsed arguments, writing the report to stdout.
///
/// # Errors
///
/// Returns an error if the scan root is unusable, the scan was
/// cancelled before it began, or the report cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

/// Run dupefind, writing the report to `out`.
///
/// # Errors
///
/// See [`run_app`].
pub fn run_with_output<W: Write>(cli: Cli, out: &mut W) -> Result<ExitCode> {
    let start_time = Instant::now();

    let mut config = Config::load(cli.config.as_deref());
    config.merge_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let root = match cli.path {
        Some(ref path) => path.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let handler = signal::install_handler()?;
    let progress = Arc::new(Progress::new(cli.quiet || config.progress_interval == 0));

    let options = config
        .to_scan_options()
        .with_shutdown_flag(handler.get_flag())
        .with_progress_callback(progress);
    let finder = DuplicateFinder::new(options);

    let outcome = finder.scan(&root)?;

    report::write_report(out, &outcome.table).context("Failed to write report")?;

    if outcome.summary.has_errors() {
        log::warn!(
            "{} files or directories could not be read and were skipped",
            outcome.summary.errors.len()
        );
    }

    if cli.summary {
        log_summary(&outcome.summary);
    }
    if finder.options().report_total_time {
        log::info!("Total run time: {:.2?}", start_time.elapsed());
    }

    if outcome.summary.interrupted {
        log::warn!("Scan was interrupted; the report above is incomplete");
        Ok(ExitCode::Interrupted)
    } else {
        Ok(ExitCode::Success)
    }
}

fn log_summary(summary: &ScanSummary) {
    log::info!(
        "Processed {} files: {} hashed, {} empty, {} failed, {} unreadable directories",
        summary.files_processed,
        summary.files_recorded,
        summary.empty_files,
        summary.failed_files,
        summary.directory_errors
    );
    log::info!(
        "{} duplicate groups, {} redundant copies, {} reclaimable",
        summary.duplicate_groups,
        summary.duplicate_files,
        summary.reclaimable_display()
    );
}
