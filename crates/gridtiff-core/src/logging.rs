//! Tracing setup for the `gridtiff` binary.
//!
//! Events go to `$XDG_STATE_HOME/gridtiff/gridtiff.log`; when that file cannot
//! be opened the caller falls back to stderr. `RUST_LOG` always wins over the
//! verbosity chosen on the command line.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter directives for a `-v` count: 0 keeps progress at info, 1 adds
/// per-group debug detail, 2 or more turns on trace for both crates.
pub fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn,gridtiff=info,gridtiff_core=info",
        1 => "warn,gridtiff=debug,gridtiff_core=debug",
        _ => "info,gridtiff=trace,gridtiff_core=trace",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)))
}

/// Path of the log file, creating its directory.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gridtiff")?;
    let path = xdg_dirs
        .place_state_file("gridtiff.log")
        .context("create log directory")?;
    Ok(path)
}

/// Sends events to the log file, appending across runs.
///
/// Returns `Err` if the file cannot be opened or a subscriber is already set;
/// use [`init_logging_stderr`] then.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let path = log_file_path()?;
    let file = open_append(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    tracing::debug!(verbosity, "logging to {}", path.display());
    Ok(())
}

/// Sends events to stderr. Never fails; a second call is a no-op.
pub fn init_logging_stderr(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn open_append(path: &std::path::Path) -> Result<File> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}
