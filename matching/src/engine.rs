//! Match state machine
//!
//! Transitions:
//!
//! | op | precondition | authorization | effect |
//! |---|---|---|---|
//! | `propose` | ≥1 known interest | bound identity | new pending record |
//! | `verify_match` | record pending | caller is counterparty | matched; compatibility × 1.10 |
//! | `reject_match` | record pending | bound identity | rejected |
//!
//! Failed transitions leave stored state untouched. Checks run against a
//! fresh snapshot, then the write lands last-writer-wins; two callers
//! racing the same record is part of the accepted consistency model.

use crate::{
    config::Config,
    error::{Error, Result},
    policy::{AuthorizationPolicy, CounterpartyPolicy},
};
use aura_core::{
    codec::{Operation, ReferenceCodec, ScalarCodec},
    ledger::Ledger,
    registry::MatchRegistry,
    signer::Signer,
    types::{is_known_interest, Identity, MatchDraft, MatchId, MatchRecord, MatchStatus},
};
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;

/// Match lifecycle engine
pub struct MatchEngine {
    /// Record and index CRUD
    registry: MatchRegistry,

    /// Identity and signature collaborator
    signer: Arc<dyn Signer>,

    /// Encrypted-value codec
    codec: Arc<dyn ScalarCodec>,

    /// Acceptance authorization
    policy: Arc<dyn AuthorizationPolicy>,

    /// Configuration
    config: Config,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MatchEngine {
    /// Create an engine with the reference codec and counterparty policy
    pub fn new(ledger: Arc<dyn Ledger>, signer: Arc<dyn Signer>, config: Config) -> Self {
        Self {
            registry: MatchRegistry::new(ledger),
            signer,
            codec: Arc::new(ReferenceCodec),
            policy: Arc::new(CounterpartyPolicy),
            config,
        }
    }

    /// Swap in a different codec implementation
    pub fn with_codec(mut self, codec: Arc<dyn ScalarCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Swap in a different authorization policy
    pub fn with_policy(mut self, policy: Arc<dyn AuthorizationPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Registry backing this engine
    pub fn registry(&self) -> &MatchRegistry {
        &self.registry
    }

    /// Codec backing this engine
    pub fn codec(&self) -> &Arc<dyn ScalarCodec> {
        &self.codec
    }

    /// Identity bound to the session
    pub fn identity(&self) -> Result<Identity> {
        self.signer.identity().ok_or(Error::Unauthenticated)
    }

    /// Load every readable match, newest first
    pub async fn load_matches(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.registry.load_all().await?)
    }

    /// Propose a match with simulated scores
    ///
    /// Distance and compatibility are drawn fresh per proposal and encoded
    /// before they touch the draft; plaintext never reaches the registry.
    pub async fn propose(&self, interests: Vec<String>) -> Result<MatchId> {
        let (distance, compatibility) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(0..self.config.scores.max_distance) as f64,
                rng.gen_range(0..self.config.scores.max_compatibility) as f64,
            )
        };
        self.propose_with_scores(interests, distance, compatibility)
            .await
    }

    /// Propose a match with explicit scores
    pub async fn propose_with_scores(
        &self,
        interests: Vec<String>,
        distance: f64,
        compatibility: f64,
    ) -> Result<MatchId> {
        let identity = self.identity()?;
        validate_interests(&interests)?;

        let draft = MatchDraft {
            encrypted_distance: self.codec.encode(distance),
            encrypted_compatibility: self.codec.encode(compatibility),
            created_at: Utc::now().timestamp(),
            counterparty: identity.clone(),
            interests,
        };

        let id = self.registry.propose(draft).await?;
        tracing::info!(match_id = %id, identity = %identity, "Proposed match");
        Ok(id)
    }

    /// Accept a pending match as its counterparty
    ///
    /// Applies the acceptance bump: the encrypted compatibility is replaced
    /// by `transform(old, Increase10Pct)` without decrypting it here.
    pub async fn verify_match(&self, id: &MatchId) -> Result<MatchRecord> {
        let identity = self.identity()?;
        let record = self.registry.get_one(id).await?;

        require_pending(&record)?;
        if !self.policy.may_accept(&identity, &record) {
            tracing::warn!(match_id = %id, identity = %identity, "Acceptance refused by policy");
            return Err(Error::Unauthorized(identity.to_string()));
        }

        let bumped = self
            .codec
            .transform(&record.encrypted_compatibility, Operation::Increase10Pct)?;

        let updated = self
            .registry
            .update(id, move |mut record| {
                record.status = MatchStatus::Matched;
                record.encrypted_compatibility = bumped;
                record
            })
            .await?;

        tracing::info!(match_id = %id, "Match accepted");
        Ok(updated)
    }

    /// Reject a pending match
    ///
    /// Any bound identity may reject; ciphertexts are left untouched.
    pub async fn reject_match(&self, id: &MatchId) -> Result<MatchRecord> {
        let identity = self.identity()?;
        let record = self.registry.get_one(id).await?;
        require_pending(&record)?;

        let updated = self
            .registry
            .update(id, |mut record| {
                record.status = MatchStatus::Rejected;
                record
            })
            .await?;

        tracing::info!(match_id = %id, identity = %identity, "Match rejected");
        Ok(updated)
    }
}

fn require_pending(record: &MatchRecord) -> Result<()> {
    if record.status != MatchStatus::Pending {
        return Err(Error::InvalidTransition {
            id: record.id.clone(),
            from: record.status,
        });
    }
    Ok(())
}

fn validate_interests(interests: &[String]) -> Result<()> {
    if interests.is_empty() {
        return Err(Error::NoInterests);
    }
    for interest in interests {
        if !is_known_interest(interest) {
            return Err(Error::UnknownInterest(interest.clone()));
        }
    }
    Ok(())
}
