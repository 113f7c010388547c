//! File-backed tracing for the terminal app.
//!
//! The TUI owns stdout, so events go to `checkout.log` under the data
//! directory. The filter is read from `CHECKOUT_LOG` and defaults to `info`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the tracing filter directive.
pub const LOG_VAR: &str = "CHECKOUT_LOG";

const LOG_FILE: &str = "checkout.log";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("could not determine data directory")]
    NoDataDir,

    #[error("could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("tracing subscriber already installed: {0}")]
    Init(#[from] TryInitError),
}

/// Default log directory: `<data_dir>/sidebar-checkout`.
pub fn default_log_dir() -> Result<PathBuf, LoggingError> {
    dirs::data_dir()
        .map(|d| d.join("sidebar-checkout"))
        .ok_or(LoggingError::NoDataDir)
}

/// Opens (creating if needed) the log file inside `dir` for appending.
pub fn open_log_file(dir: &Path) -> Result<(PathBuf, File), LoggingError> {
    let path = dir.join(LOG_FILE);
    let open = || -> std::io::Result<File> {
        fs::create_dir_all(dir)?;
        OpenOptions::new().create(true).append(true).open(&path)
    };
    match open() {
        Ok(file) => Ok((path, file)),
        Err(source) => Err(LoggingError::Open { path, source }),
    }
}

/// Builds the filter from `directive`, falling back to `info` when it is
/// missing or unparsable.
pub fn env_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to `dir/checkout.log`.
///
/// Returns the log file path.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init(dir: &Path) -> Result<PathBuf, LoggingError> {
    let (path, file) = open_log_file(dir)?;
    let directive = std::env::var(LOG_VAR).ok();
    tracing_subscriber::registry()
        .with(env_filter(directive.as_deref()))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()?;
    Ok(path)
}
