//! Diagnostic logging for dupefind.
//!
//! Everything except the duplicate report goes through the `log` facade to
//! an `env_logger` writer on stderr, so stdout carries only the report.
//!
//! The filter comes from `RUST_LOG` when it is set and non-empty, otherwise
//! from the CLI flags: `--quiet` keeps errors only, `-v` enables debug,
//! `-vv` trace, and the default is info.
//!
//! Release builds print `<label>: <message>` (`warning: Cannot read
//! directory ...`). Debug builds prefix a timestamp and, with `-v`, the
//! module that logged.

use std::env;
use std::io::Write;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter, SetLoggerError};

/// Where the log filter comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterSource {
    /// A `RUST_LOG` directive string
    Env(String),
    /// A level picked from `--quiet` / `--verbose`
    Flags(LevelFilter),
}

/// Resolved logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    source: FilterSource,
    show_module: bool,
}

impl LogSettings {
    /// Resolve settings from CLI flags and an optional `RUST_LOG` value.
    ///
    /// An empty `RUST_LOG` counts as unset.
    #[must_use]
    pub fn resolve(verbose: u8, quiet: bool, rust_log: Option<String>) -> Self {
        let source = match rust_log.filter(|v| !v.trim().is_empty()) {
            Some(directives) => FilterSource::Env(directives),
            None => FilterSource::Flags(level_for_flags(verbose, quiet)),
        };
        Self {
            source,
            show_module: verbose >= 1,
        }
    }

    /// Level chosen by the flags, or `None` when `RUST_LOG` decides.
    #[must_use]
    pub fn flag_level(&self) -> Option<LevelFilter> {
        match self.source {
            FilterSource::Flags(level) => Some(level),
            FilterSource::Env(_) => None,
        }
    }

    fn builder(&self) -> Builder {
        let mut builder = Builder::new();
        builder.target(Target::Stderr);

        match self.source {
            FilterSource::Env(ref directives) => {
                builder.parse_filters(directives);
            }
            FilterSource::Flags(level) => {
                builder.filter_level(level);
            }
        }

        let show_module = self.show_module;
        builder.format(move |buf, record| {
            let style = buf.default_level_style(record.level());
            let label = label(record.level());

            if cfg!(debug_assertions) {
                let timestamp = buf.timestamp_seconds();
                if show_module {
                    writeln!(
                        buf,
                        "{timestamp} {style}{label}{style:#} [{}]: {}",
                        record.module_path().unwrap_or("dupefind"),
                        record.args()
                    )
                } else {
                    writeln!(buf, "{timestamp} {style}{label}{style:#}: {}", record.args())
                }
            } else {
                writeln!(buf, "{style}{label}{style:#}: {}", record.args())
            }
        });

        builder
    }
}

/// Initialize the logger from CLI flags and `RUST_LOG`.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger was already installed.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<(), SetLoggerError> {
    let settings = LogSettings::resolve(verbose, quiet, env::var("RUST_LOG").ok());
    settings.builder().try_init()?;

    match settings.source {
        FilterSource::Env(ref directives) => {
            log::debug!("Logging configured from RUST_LOG={directives}");
        }
        FilterSource::Flags(level) => log::debug!("Logging configured at {level}"),
    }
    Ok(())
}

fn level_for_flags(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

/// Lowercase label printed before each message.
fn label(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warning",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}
