//! Match Engine
//!
//! State machine and authenticated decryption flow over encrypted match
//! records.
//!
//! # Architecture
//!
//! The engine owns the match lifecycle:
//!
//! 1. **Propose**: encode simulated scores, write a pending record
//! 2. **Accept**: counterparty-only; bumps the encrypted compatibility
//! 3. **Reject**: terminal decline, ciphertexts untouched
//! 4. **Decrypt**: plaintext is gated behind a signed session challenge
//!
//! Records are fetched fresh from the registry for every operation; nothing
//! in this crate is a source of truth.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use aura_core::{LocalSigner, MemoryLedger};
//! use matching::{Config, MatchEngine};
//!
//! #[tokio::main]
//! async fn main() -> matching::Result<()> {
//!     let ledger = Arc::new(MemoryLedger::new());
//!     let signer = Arc::new(LocalSigner::generate());
//!     let engine = MatchEngine::new(ledger, signer, Config::default());
//!
//!     let id = engine.propose(vec!["Web3".into(), "Art".into()]).await?;
//!     let record = engine.verify_match(&id).await?;
//!     println!("match {} is now {}", record.id, record.status);
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod config;
pub mod decrypt;
pub mod engine;
pub mod error;
pub mod policy;
pub mod view;

// Re-exports
pub use config::Config;
pub use decrypt::{ChallengeParams, DecryptSession};
pub use engine::MatchEngine;
pub use error::{Error, Result};
pub use policy::{AuthorizationPolicy, CounterpartyPolicy};
pub use view::MatchStats;
