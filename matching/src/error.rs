//! Error types for the match engine

use aura_core::types::{MatchId, MatchStatus};
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors
#[derive(Error, Debug)]
pub enum Error {
    /// Core error (ledger, registry, codec)
    #[error("Core error: {0}")]
    Core(#[from] aura_core::Error),

    /// No identity bound to the session
    #[error("No identity bound; connect a signer first")]
    Unauthenticated,

    /// Status precondition violated
    #[error("Invalid transition for match {id}: status is {from}")]
    InvalidTransition {
        /// Match the transition was attempted against
        id: MatchId,
        /// Status the record was found in
        from: MatchStatus,
    },

    /// Caller is not allowed to accept this match
    #[error("Identity {0} may not accept this match")]
    Unauthorized(String),

    /// No interest selected at proposal time
    #[error("At least one interest must be selected")]
    NoInterests,

    /// Interest outside the fixed vocabulary
    #[error("Unknown interest: {0}")]
    UnknownInterest(String),

    /// Signature declined or signer collaborator failed
    #[error("Decryption aborted: {0}")]
    DecryptionAborted(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

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
