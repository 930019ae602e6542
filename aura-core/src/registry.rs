//! Match registry
//!
//! Maintains the match index and record CRUD over the ledger collaborator.
//!
//! # Consistency
//!
//! `propose` and `update` are read-modify-write pairs with no isolation:
//! two concurrent proposals can race on the index write and one append can
//! be lost (last writer wins). The target ledger offers no transactional
//! append or compare-and-swap, and this module does not pretend otherwise.

use crate::{
    error::{Error, Result},
    ledger::Ledger,
    metrics::Metrics,
    types::{MatchDraft, MatchId, MatchRecord, StoredMatch},
};
use std::sync::Arc;

/// Ledger key holding the JSON array of match ids
pub const INDEX_KEY: &str = "match_keys";

/// Ledger key holding one match record
pub fn record_key(id: &MatchId) -> String {
    format!("match_{}", id)
}

/// Registry over match records and their index
pub struct MatchRegistry {
    /// Ledger collaborator
    ledger: Arc<dyn Ledger>,

    /// Operation counters
    metrics: Metrics,
}

impl std::fmt::Debug for MatchRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchRegistry").finish_non_exhaustive()
    }
}

impl MatchRegistry {
    /// Create a registry over a ledger
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self::with_metrics(ledger, Metrics::default())
    }

    /// Create a registry with an externally owned metrics collector
    pub fn with_metrics(ledger: Arc<dyn Ledger>, metrics: Metrics) -> Self {
        Self { ledger, metrics }
    }

    /// Metrics collector backing this registry
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Load every readable match record, newest first
    ///
    /// An absent or unparseable index is a valid empty state. A record that
    /// is empty or fails to parse is skipped with a warning; partial
    /// corruption must not block the whole view.
    pub async fn load_all(&self) -> Result<Vec<MatchRecord>> {
        self.metrics.record_index_load();

        if !self.ledger.is_available().await? {
            tracing::warn!("Ledger unavailable, serving empty match view");
            return Ok(Vec::new());
        }

        let index_bytes = self.ledger.get_data(INDEX_KEY).await?;
        let ids = parse_index(&index_bytes);

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            let id = MatchId::new(id);
            match self.try_fetch(&id).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    self.metrics.record_skipped();
                    tracing::warn!(match_id = %id, error = %e, "Skipping unreadable match record");
                }
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        tracing::debug!(count = records.len(), "Loaded match view");
        Ok(records)
    }

    /// Write a new record and append its id to the index
    ///
    /// The record write lands before the index append; a crash between the
    /// two leaves an orphaned record, which bulk loads never see.
    pub async fn propose(&self, draft: MatchDraft) -> Result<MatchId> {
        let id = MatchId::generate();
        let record = draft.into_record(id.clone());

        self.put_record(&record).await?;

        // Read-append-rewrite; no isolation against concurrent proposals
        let index_bytes = self.ledger.get_data(INDEX_KEY).await?;
        let mut ids = parse_index(&index_bytes);
        ids.push(id.as_str().to_string());
        let encoded = serde_json::to_vec(&ids)?;
        self.ledger.set_data(INDEX_KEY, encoded).await?;

        self.metrics.record_proposal();
        tracing::info!(match_id = %id, index_len = ids.len(), "Match proposed");
        Ok(id)
    }

    /// Fetch one record
    pub async fn get_one(&self, id: &MatchId) -> Result<MatchRecord> {
        self.try_fetch(id).await
    }

    /// Fetch, mutate, and write back one record
    ///
    /// Last-writer-wins; there is no optimistic concurrency check.
    pub async fn update<F>(&self, id: &MatchId, mutator: F) -> Result<MatchRecord>
    where
        F: FnOnce(MatchRecord) -> MatchRecord,
    {
        let record = self.try_fetch(id).await?;
        let updated = mutator(record);
        self.put_record(&updated).await?;

        self.metrics.record_update();
        tracing::info!(match_id = %id, status = %updated.status, "Match record updated");
        Ok(updated)
    }

    async fn try_fetch(&self, id: &MatchId) -> Result<MatchRecord> {
        let bytes = self.ledger.get_data(&record_key(id)).await?;
        if bytes.is_empty() {
            return Err(Error::NotFound(id.to_string()));
        }
        let stored: StoredMatch = serde_json::from_slice(&bytes)?;
        Ok(stored.into_record(id.clone()))
    }

    async fn put_record(&self, record: &MatchRecord) -> Result<()> {
        let stored = StoredMatch::from(record);
        let bytes = serde_json::to_vec(&stored)?;
        self.ledger.set_data(&record_key(&record.id), bytes).await?;
        Ok(())
    }
}

/// Parse index bytes, treating absent or malformed content as empty
fn parse_index(bytes: &[u8]) -> Vec<String> {
    if bytes.is_empty() {
        return Vec::new();
    }
    match serde_json::from_slice(bytes) {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(error = %e, "Match index unparseable, treating as empty");
            Vec::new()
        }
    }
}
