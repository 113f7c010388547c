use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Errors that can stop the terminal app.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, runtime setup).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The environment held an invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}
