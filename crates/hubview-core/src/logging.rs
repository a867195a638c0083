//! Tracing subscriber setup.
//!
//! The full-screen TUI owns the terminal, so it logs to a daily-rotated file.
//! Headless commands log to stderr.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (falls back to `RUST_LOG`).
pub const LOG_ENV: &str = "HUBVIEW_LOG";

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE_PREFIX: &str = "hubview.log";

/// Where log output goes.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// Directory for rotated log files.
    File(PathBuf),
}

/// Builds the filter from `HUBVIEW_LOG`, then `RUST_LOG`, then the default.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global tracing subscriber.
///
/// The returned guard must be held until exit when logging to a file,
/// otherwise buffered lines are lost.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a subscriber
/// is already installed.
pub fn init(target: LogTarget) -> Result<Option<WorkerGuard>> {
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| anyhow!(e))
                .context("Failed to install log subscriber")?;
            Ok(None)
        }
        LogTarget::File(dir) => {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow!(e))
                .context("Failed to install log subscriber")?;
            Ok(Some(guard))
        }
    }
}
