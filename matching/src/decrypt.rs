//! Authenticated decryption flow
//!
//! Plaintext exposure of an encrypted compatibility score is gated behind a
//! signature proving identity control. The challenge parameters are fixed
//! when the session is created and reused for every decrypt attempt within
//! it; a signature replay inside one session is accepted.
//!
//! A session is `&mut self` per decrypt: a second decrypt while one is
//! pending cannot be issued through the same session, which is the
//! reentrancy guard the flow itself does not provide.

use crate::{
    config::Config,
    error::{Error, Result},
};
use aura_core::{
    codec::ScalarCodec,
    ledger::Ledger,
    signer::Signer,
    types::{MatchId, MatchRecord},
};
use chrono::Utc;
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Session-fixed parameters of the decryption challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeParams {
    /// Session public key (hex blob)
    pub public_key: String,

    /// Ledger endpoint the challenge is scoped to
    pub contract_address: String,

    /// Chain the ledger lives on
    pub chain_id: u64,

    /// Session start (unix seconds)
    pub start_timestamp: i64,

    /// Challenge validity window (days)
    pub duration_days: u32,
}

impl ChallengeParams {
    /// Render the canonical multi-line message the signer sees
    pub fn canonical_message(&self) -> String {
        format!(
            "publickey:{}\ncontractAddresses:{}\ncontractsChainId:{}\nstartTimestamp:{}\ndurationDays:{}",
            self.public_key,
            self.contract_address,
            self.chain_id,
            self.start_timestamp,
            self.duration_days
        )
    }
}

/// Session-scoped decryption context
///
/// Owns the challenge, the signer handoff, and the ephemeral view state of
/// revealed values. Nothing here is process-wide: drop the session and the
/// plaintext goes with it.
pub struct DecryptSession {
    /// Session id (diagnostics only)
    session_id: Uuid,

    /// Challenge fixed at session creation
    challenge: ChallengeParams,

    /// Signature collaborator
    signer: Arc<dyn Signer>,

    /// Encrypted-value codec
    codec: Arc<dyn ScalarCodec>,

    /// Artificial latency standing in for decryption work
    latency: Duration,

    /// Revealed plaintext per match, ephemeral view state
    revealed: HashMap<MatchId, f64>,
}

impl std::fmt::Debug for DecryptSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptSession")
            .field("session_id", &self.session_id)
            .field("challenge", &self.challenge)
            .finish_non_exhaustive()
    }
}

impl DecryptSession {
    /// Create a session with challenge parameters taken from the ledger
    /// endpoint and configuration
    pub async fn initialize(
        ledger: &dyn Ledger,
        signer: Arc<dyn Signer>,
        codec: Arc<dyn ScalarCodec>,
        config: &Config,
    ) -> Result<Self> {
        let contract_address = ledger.address().await.map_err(Error::Core)?;

        let challenge = ChallengeParams {
            public_key: generate_session_key(config.session.session_key_bytes),
            contract_address,
            chain_id: config.chain_id,
            start_timestamp: Utc::now().timestamp(),
            duration_days: config.session.duration_days,
        };

        let session = Self {
            session_id: Uuid::new_v4(),
            challenge,
            signer,
            codec,
            latency: Duration::from_millis(config.session.decrypt_latency_ms),
            revealed: HashMap::new(),
        };

        tracing::info!(session_id = %session.session_id, "Decrypt session initialized");
        Ok(session)
    }

    /// Challenge parameters fixed for this session
    pub fn challenge(&self) -> &ChallengeParams {
        &self.challenge
    }

    /// Reveal the compatibility score of a record
    ///
    /// Suspends on the signature request and the decryption latency. On
    /// signer decline nothing is cached and `DecryptionAborted` surfaces.
    pub async fn decrypt_compatibility(&mut self, record: &MatchRecord) -> Result<f64> {
        let identity = self.signer.identity().ok_or(Error::Unauthenticated)?;

        let message = self.challenge.canonical_message();
        self.signer
            .sign_message(&message)
            .await
            .map_err(|e| Error::DecryptionAborted(e.to_string()))?;

        // Stand-in for the latency of a real decryption service
        tokio::time::sleep(self.latency).await;

        let value = self.codec.decode(&record.encrypted_compatibility)?;
        self.revealed.insert(record.id.clone(), value);

        tracing::debug!(
            session_id = %self.session_id,
            match_id = %record.id,
            identity = %identity,
            "Compatibility revealed"
        );
        Ok(value)
    }

    /// Plaintext currently revealed for a match, if any
    pub fn revealed(&self, id: &MatchId) -> Option<f64> {
        self.revealed.get(id).copied()
    }

    /// Drop a revealed value from view
    ///
    /// Pure view action: the signer is not consulted and nothing is
    /// revoked; a later decrypt yields the same plaintext.
    pub fn hide(&mut self, id: &MatchId) {
        self.revealed.remove(id);
    }
}

/// Generate the hex public-key blob carried in the challenge
fn generate_session_key(len_bytes: usize) -> String {
    let mut bytes = vec![0u8; len_bytes];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}
