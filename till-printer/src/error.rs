//! Error types for the printer library

use thiserror::Error;

/// Printer error types
///
/// Every variant is terminal for the current print attempt; nothing here is
/// retried internally. The `Display` text doubles as the user-facing failure
/// message.
#[derive(Debug, Error)]
pub enum PrintError {
    /// Connection error while opening or using a port
    #[error("Connection failed: {0}")]
    Connection(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Printer is offline or unreachable
    #[error("Printer is offline: {0}")]
    Offline(String),

    /// Printer cover is open
    #[error("Printer cover is open: {0}")]
    CoverOpen(String),

    /// Receipt paper roll is empty
    #[error("Receipt paper is empty: {0}")]
    PaperEmpty(String),

    /// Timeout waiting for printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid port configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
