//! Error types for linewire

use thiserror::Error;

/// Result type for linewire operations
pub type Result<T> = std::result::Result<T, LineError>;

/// Linewire error types
#[derive(Debug, Error)]
pub enum LineError {
    /// No more data can arrive on the connection
    #[error("The connection has closed")]
    ConnectionClosed,

    /// A read loop is already active on this reader
    #[error("Reader has already started reading")]
    AlreadyStarted,

    /// Transport failure while writing, closing or connecting
    #[error("Transport error: {0}")]
    Transport(String),
}

impl LineError {
    /// Whether this error means the peer is gone for good
    pub fn is_closed(&self) -> bool {
        matches!(self, LineError::ConnectionClosed)
    }
}
