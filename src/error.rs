//! Error handling for the SpaceCRAFT crate.

use std::path::PathBuf;

/// A specialized `Result` type for SpaceCRAFT operations.
pub type Result<T> = std::result::Result<T, SpaceCraftError>;

/// The main error type for log reading and world rendering.
#[derive(Debug, thiserror::Error)]
pub enum SpaceCraftError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sensor log could not be opened
    #[error("Failed to open log {}: {source}", path.display())]
    LogOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row of the sensor log is malformed
    #[error("Malformed log data: {0}")]
    Csv(#[from] csv::Error),

    /// A field could not be parsed
    #[error("Failed to parse value: {0}")]
    Parse(String),

    /// The game world connection could not be established
    #[error("Connection error: {0}")]
    Connection(String),

    /// The game world replied with something unexpected
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// GPIO operation failed (only available with gpio feature)
    #[cfg(feature = "gpio")]
    #[error("GPIO error: {0}")]
    Gpio(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SpaceCraftError {
    /// Create a new parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new connection error
    pub fn connection_error(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a new protocol error
    pub fn protocol_error(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a new GPIO error
    #[cfg(feature = "gpio")]
    pub fn gpio_error(msg: impl Into<String>) -> Self {
        Self::Gpio(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error came from the log file rather than the world.
    pub fn is_log_error(&self) -> bool {
        matches!(self, Self::LogOpen { .. } | Self::Csv(_) | Self::Parse(_))
    }
}
