//! # Print Error Types

use kermes_core::ValidationError;
use thiserror::Error;

/// Failure reported by a transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    /// The device is offline, unplugged or unknown.
    #[error("Printer unavailable: {0}")]
    Unavailable(String),

    /// The device was reached but the transfer broke off.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Errors surfaced by the printing layer.
#[derive(Debug, Error)]
pub enum PrintError {
    /// The sink rejected the job or failed to deliver it.
    ///
    /// Nothing is retried automatically; calling `print_cart` again is the
    /// retry.
    #[error("Print failed: {0}")]
    PrintFailed(String),

    /// The cart holds a line that cannot be printed (quantity < 1, ...).
    #[error("Invalid cart: {0}")]
    InvalidCart(#[from] ValidationError),

    #[error("Failed to load printer config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save printer config: {0}")]
    ConfigSaveFailed(String),

    #[error("Invalid printer config: {0}")]
    InvalidConfig(String),
}

impl From<toml::de::Error> for PrintError {
    fn from(err: toml::de::Error) -> Self {
        PrintError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for PrintError {
    fn from(err: toml::ser::Error) -> Self {
        PrintError::ConfigSaveFailed(err.to_string())
    }
}

/// Result type for printing operations.
pub type PrintResult<T> = Result<T, PrintError>;
