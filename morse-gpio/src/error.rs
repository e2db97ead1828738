//! Error types for the sysfs shim and the command line front end

use std::io;
use std::path::PathBuf;

use morse_core::{ConfigError, HalError, ValidationError};
use thiserror::Error;

/// Result type for command line operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors raised while driving a sysfs GPIO line
#[derive(Error, Debug)]
pub enum GpioError {
    /// A sysfs file could not be opened or written
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Pin lifecycle misuse
    #[error(transparent)]
    Hal(#[from] HalError),
}

impl GpioError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GpioError::Io {
            path: path.into(),
            source,
        }
    }
}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Errors that end a command line run with a non-zero status
#[derive(Error, Debug)]
pub enum AppError {
    /// Nothing to send
    #[error("no messages given")]
    NoMessages,

    /// Timing flags out of range
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A message failed validation and the run was set to abort
    #[error("message {} rejected: {error}", .index + 1)]
    Rejected { index: usize, error: ValidationError },

    /// Acquiring, writing or releasing the pin failed
    #[error(transparent)]
    Gpio(#[from] GpioError),

    /// Failure reported by a generic HAL implementation
    #[error(transparent)]
    Hal(#[from] HalError),
}
