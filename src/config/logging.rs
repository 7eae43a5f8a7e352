//! Diagnostic logging setup
//!
//! The TUI owns the terminal, so tracing output always goes to
//! `expenses.log` in the base directory.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use super::paths::ExpensePaths;
use super::settings::Settings;
use crate::error::ExpenseError;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "EXPENSE_TRACKER_LOG";

/// Install the global tracing subscriber
///
/// The filter comes from `EXPENSE_TRACKER_LOG` when set, otherwise from
/// `settings.log_level`. Installing twice is not an error; the first
/// subscriber stays in place.
pub fn init_logging(paths: &ExpensePaths, settings: &Settings) -> Result<(), ExpenseError> {
    paths.ensure_directories()?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .map_err(|e| ExpenseError::Io(format!("Failed to open log file: {}", e)))?;

    let filter = std::env::var(LOG_ENV)
        .unwrap_or_else(|_| format!("expenses={}", settings.log_level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(log_file = %paths.log_file().display(), "logging initialized");
    }

    Ok(())
}
