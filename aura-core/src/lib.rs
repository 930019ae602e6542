//! AuraMatch Core
//!
//! Encrypted match records over an external key-value ledger.
//!
//! # Architecture
//!
//! - **Opaque scalars**: compatibility and distance never leave the codec
//!   boundary as plaintext
//! - **Snapshot reads**: the ledger copy of a record is the source of truth;
//!   every operation fetches fresh
//! - **Whole-value writes**: the ledger is mutated by full-record overwrite
//!   only, last writer wins
//!
//! # Invariants
//!
//! - Status transitions: pending → matched, pending → rejected; both terminal
//! - Every id in the match index should have a record, but a missing or
//!   corrupt record never fails a bulk load
//! - Tokens produced by the codec always decode

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod codec;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod registry;
pub mod signer;
pub mod types;

// Re-exports
pub use codec::{Operation, ReferenceCodec, ScalarCodec};
pub use error::{Error, Result};
pub use ledger::{Ledger, MemoryLedger, TxAck};
pub use registry::MatchRegistry;
pub use signer::{KeyPair, LocalSigner, MessageSignature, Signer};
pub use types::{
    EncryptedScalar, Identity, MatchDraft, MatchId, MatchRecord, MatchStatus,
};
