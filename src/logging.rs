//! Logging initialization for `sdash`.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `SDASH_LOG` environment variable, falling back to the configured level.
//!
//! # Usage
//!
//! ```bash
//! # Default (info level, or [logging] level from config)
//! sdash show
//!
//! # Module-specific filtering
//! SDASH_LOG=studio_dashboard::store=debug,warn sdash edit
//! ```

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "SDASH_LOG";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// Append to a file. Used by the terminal editor, which owns the screen.
    File(PathBuf),
}

/// Builds the filter: `SDASH_LOG` when set and valid, otherwise `level`.
pub fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Initialize the global tracing subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init(level: LogLevel, target: &LogTarget) -> std::io::Result<()> {
    let builder = fmt().with_env_filter(filter(level)).with_target(false);
    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
