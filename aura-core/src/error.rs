//! Error types for the match core

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors
#[derive(Error, Debug)]
pub enum Error {
    /// Ledger collaborator error (transport, availability)
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Record or index key absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed encrypted token
    #[error("Decode error: {0}")]
    Decode(String),

    /// Signature creation or verification failed
    #[error("Signature error: {0}")]
    Signature(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
