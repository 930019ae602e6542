//! Core types for encrypted matching
//!
//! All types are designed for:
//! - JSON wire compatibility (the ledger stores UTF-8 JSON)
//! - Opaque score handling (plaintext never appears in a record)
//! - Snapshot semantics (records are fetched fresh per operation)

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed interest vocabulary a match profile may draw from
pub const INTEREST_VOCABULARY: [&str; 15] = [
    "Web3",
    "DeFi",
    "NFTs",
    "Gaming",
    "Music",
    "Art",
    "Tech",
    "Travel",
    "Food",
    "Sports",
    "Reading",
    "Photography",
    "Coding",
    "Blockchain",
    "AI",
];

/// Check whether an interest belongs to the fixed vocabulary
pub fn is_known_interest(interest: &str) -> bool {
    INTEREST_VOCABULARY.contains(&interest)
}

/// Address-like identity string bound to a session
///
/// Compared case-insensitively: wallet addresses arrive in mixed
/// checksum casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Create new identity
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive equality
    pub fn matches(&self, other: &Identity) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Match identifier
///
/// Generated from a millisecond timestamp plus a random base36 suffix.
/// Collision probability is negligible but not zero; index insertion is
/// not atomic, so callers must not assume uniqueness is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(String);

const ID_SUFFIX_LEN: usize = 7;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

impl MatchId {
    /// Create from an existing id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("{}-{}", millis, suffix))
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque encrypted scalar token
///
/// Holders outside the authenticated decryption boundary must treat this
/// as indistinguishable from random and never decode it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedScalar(String);

impl EncryptedScalar {
    /// Wrap a raw token
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncryptedScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Match lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Awaiting a decision by the counterparty
    Pending,
    /// Accepted (terminal)
    Matched,
    /// Declined (terminal)
    Rejected,
}

impl MatchStatus {
    /// Check if status is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Matched | MatchStatus::Rejected)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Matched => "matched",
            MatchStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// Match record snapshot
///
/// The ledger copy is the source of truth; this struct is a point-in-time
/// view fetched for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// Unique match id (ledger key suffix)
    pub id: MatchId,

    /// Encrypted distance between the parties
    pub encrypted_distance: EncryptedScalar,

    /// Encrypted compatibility score
    pub encrypted_compatibility: EncryptedScalar,

    /// Creation time (unix seconds)
    pub created_at: i64,

    /// Identity allowed to accept this match
    pub counterparty: Identity,

    /// Lifecycle status
    pub status: MatchStatus,

    /// Interests attached to the match profile
    pub interests: Vec<String>,
}

/// A match record before an id has been assigned
///
/// Produced by the engine, consumed by `MatchRegistry::propose`.
#[derive(Debug, Clone)]
pub struct MatchDraft {
    /// Encrypted distance between the parties
    pub encrypted_distance: EncryptedScalar,

    /// Encrypted compatibility score
    pub encrypted_compatibility: EncryptedScalar,

    /// Creation time (unix seconds)
    pub created_at: i64,

    /// Identity allowed to accept this match
    pub counterparty: Identity,

    /// Interests attached to the match profile
    pub interests: Vec<String>,
}

impl MatchDraft {
    /// Promote to a full record under a fresh id (status starts pending)
    pub fn into_record(self, id: MatchId) -> MatchRecord {
        MatchRecord {
            id,
            encrypted_distance: self.encrypted_distance,
            encrypted_compatibility: self.encrypted_compatibility,
            created_at: self.created_at,
            counterparty: self.counterparty,
            status: MatchStatus::Pending,
            interests: self.interests,
        }
    }
}

/// Wire form of a match record, as stored under `match_{id}`
///
/// Field names follow the ledger JSON schema. Old records may omit
/// `status` and `interests`; absent values default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMatch {
    /// Encrypted distance token
    pub distance: EncryptedScalar,

    /// Encrypted compatibility token
    pub compatibility: EncryptedScalar,

    /// Creation time (unix seconds)
    pub timestamp: i64,

    /// Identity allowed to accept
    #[serde(rename = "matchedAddress")]
    pub matched_address: Identity,

    /// Lifecycle status
    #[serde(default = "default_status")]
    pub status: MatchStatus,

    /// Interests attached to the match profile
    #[serde(default)]
    pub interests: Vec<String>,
}

fn default_status() -> MatchStatus {
    MatchStatus::Pending
}

impl StoredMatch {
    /// Attach the id carried by the ledger key
    pub fn into_record(self, id: MatchId) -> MatchRecord {
        MatchRecord {
            id,
            encrypted_distance: self.distance,
            encrypted_compatibility: self.compatibility,
            created_at: self.timestamp,
            counterparty: self.matched_address,
            status: self.status,
            interests: self.interests,
        }
    }
}

impl From<&MatchRecord> for StoredMatch {
    fn from(record: &MatchRecord) -> Self {
        StoredMatch {
            distance: record.encrypted_distance.clone(),
            compatibility: record.encrypted_compatibility.clone(),
            timestamp: record.created_at,
            matched_address: record.counterparty.clone(),
            status: record.status,
            interests: record.interests.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_case_insensitive_match() {
        let a = Identity::new("0xAbCd1234");
        let b = Identity::new("0xabcd1234");
        assert!(a.matches(&b));
        assert!(!a.matches(&Identity::new("0xother")));
    }

    #[test]
    fn test_match_id_shape() {
        let id = MatchId::generate();
        let (millis, suffix) = id.as_str().split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
    }

    #[test]
    fn test_match_id_uniqueness() {
        let a = MatchId::generate();
        let b = MatchId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!MatchStatus::Pending.is_terminal());
        assert!(MatchStatus::Matched.is_terminal());
        assert!(MatchStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_stored_match_defaults() {
        // Old records carry neither status nor interests
        let json = r#"{
            "distance": "FHE-NDI=",
            "compatibility": "FHE-ODc=",
            "timestamp": 1700000000,
            "matchedAddress": "0xabc"
        }"#;
        let stored: StoredMatch = serde_json::from_str(json).unwrap();
        assert_eq!(stored.status, MatchStatus::Pending);
        assert!(stored.interests.is_empty());
    }

    #[test]
    fn test_stored_match_round_trip() {
        let record = MatchRecord {
            id: MatchId::new("1700000000000-abc1234"),
            encrypted_distance: EncryptedScalar::from_token("FHE-NDI="),
            encrypted_compatibility: EncryptedScalar::from_token("FHE-ODc="),
            created_at: 1_700_000_000,
            counterparty: Identity::new("0xabc"),
            status: MatchStatus::Pending,
            interests: vec!["Web3".to_string(), "Art".to_string()],
        };

        let stored = StoredMatch::from(&record);
        let json = serde_json::to_string(&stored).unwrap();
        assert!(json.contains("\"matchedAddress\""));
        assert!(json.contains("\"pending\""));

        let parsed: StoredMatch = serde_json::from_str(&json).unwrap();
        let round_tripped = parsed.into_record(record.id.clone());
        assert_eq!(round_tripped, record);
    }

    #[test]
    fn test_interest_vocabulary() {
        assert!(is_known_interest("Web3"));
        assert!(is_known_interest("Photography"));
        assert!(!is_known_interest("Skydiving"));
    }
}
