//! Error types for protocol operations

use thiserror::Error;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while encoding or decoding protocol messages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Message decoded but violates the contract
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
