//! Metrics collection for observability
//!
//! # Metrics
//!
//! - `aura_match_proposals_total` - Matches proposed
//! - `aura_match_updates_total` - Record mutations written back
//! - `aura_match_records_skipped_total` - Corrupt or empty records skipped during bulk load
//! - `aura_match_index_loads_total` - Bulk index loads served

use prometheus::{IntCounter, Registry};
use std::sync::Arc;

/// Metrics collector
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Matches proposed
    pub proposals_total: IntCounter,

    /// Record mutations written back
    pub updates_total: IntCounter,

    /// Records skipped during bulk load
    pub records_skipped_total: IntCounter,

    /// Bulk index loads served
    pub index_loads_total: IntCounter,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let proposals_total =
            IntCounter::new("aura_match_proposals_total", "Matches proposed")?;
        registry.register(Box::new(proposals_total.clone()))?;

        let updates_total =
            IntCounter::new("aura_match_updates_total", "Record mutations written back")?;
        registry.register(Box::new(updates_total.clone()))?;

        let records_skipped_total = IntCounter::new(
            "aura_match_records_skipped_total",
            "Corrupt or empty records skipped during bulk load",
        )?;
        registry.register(Box::new(records_skipped_total.clone()))?;

        let index_loads_total =
            IntCounter::new("aura_match_index_loads_total", "Bulk index loads served")?;
        registry.register(Box::new(index_loads_total.clone()))?;

        Ok(Self {
            proposals_total,
            updates_total,
            records_skipped_total,
            index_loads_total,
            registry,
        })
    }

    /// Record a proposal
    pub fn record_proposal(&self) {
        self.proposals_total.inc();
    }

    /// Record a mutation write-back
    pub fn record_update(&self) {
        self.updates_total.inc();
    }

    /// Record a skipped record
    pub fn record_skipped(&self) {
        self.records_skipped_total.inc();
    }

    /// Record a bulk load
    pub fn record_index_load(&self) {
        self.index_loads_total.inc();
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}
