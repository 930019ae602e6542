//! Read-side helpers over a loaded match view
//!
//! These operate on snapshots returned by `MatchEngine::load_matches`; they
//! never touch the ledger.

use aura_core::types::{MatchRecord, MatchStatus};

/// Status counts over a loaded view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchStats {
    /// Records in the view
    pub total: usize,

    /// Accepted matches
    pub matched: usize,

    /// Awaiting a decision
    pub pending: usize,

    /// Declined matches
    pub rejected: usize,
}

impl MatchStats {
    /// Count statuses across a view
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut stats = MatchStats {
            total: records.len(),
            ..Default::default()
        };
        for record in records {
            match record.status {
                MatchStatus::Matched => stats.matched += 1,
                MatchStatus::Pending => stats.pending += 1,
                MatchStatus::Rejected => stats.rejected += 1,
            }
        }
        stats
    }
}

/// Filter a view by interest or counterparty substring, case-insensitive
///
/// An empty query keeps everything.
pub fn filter_matches<'a>(records: &'a [MatchRecord], query: &str) -> Vec<&'a MatchRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .interests
                .iter()
                .any(|interest| interest.to_lowercase().contains(&needle))
                || record
                    .counterparty
                    .as_str()
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect()
}
