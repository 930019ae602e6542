//! Authorization policy for match acceptance
//!
//! The reference policy compares identity strings on the client side. That
//! check is only as strong as the read path enforcing it: any party able to
//! write to the ledger directly can bypass it. Production deployments must
//! enforce acceptance server-side or on-chain; the trait seam exists so
//! that enforcement can move without touching the engine.

use aura_core::types::{Identity, MatchRecord};

/// Decides whether a caller may accept a match
pub trait AuthorizationPolicy: Send + Sync {
    /// True when `caller` is allowed to accept `record`
    fn may_accept(&self, caller: &Identity, record: &MatchRecord) -> bool;
}

/// Default policy: caller must be the record's counterparty
///
/// Identity comparison is case-insensitive; addresses arrive in mixed
/// checksum casing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterpartyPolicy;

impl AuthorizationPolicy for CounterpartyPolicy {
    fn may_accept(&self, caller: &Identity, record: &MatchRecord) -> bool {
        caller.matches(&record.counterparty)
    }
}
