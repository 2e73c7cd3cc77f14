//! Tracing subscriber setup.
//!
//! The TUI owns stdout, so logs go to a file under the user's data
//! directory. Filtering follows `PROJTERM_LOG` (default `info`).

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "PROJTERM_LOG";

/// Default log file location, creating its directory.
pub fn default_log_path() -> Option<PathBuf> {
    let dir = dirs::data_local_dir()?.join("projterm");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("projterm.log"))
}

/// Install the global subscriber writing to `log_file_path`.
///
/// Returns false if the file could not be created or a subscriber is
/// already installed; the program keeps running without logs.
pub fn init_global(log_file_path: &Path) -> bool {
    let Ok(log_file) = File::create(log_file_path) else {
        return false;
    };
    build_subscriber(log_file).try_init().is_ok()
}

pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
