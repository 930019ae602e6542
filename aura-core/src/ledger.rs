//! Ledger collaborator contract
//!
//! The ledger is an externally owned key-value store of record. The core
//! only needs get/set semantics: durability, consensus, and fees live on
//! the other side of this trait. Mutations are whole-value overwrites;
//! there is no partial write and no compare-and-swap, so concurrent
//! writers race with last-writer-wins outcomes.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Acknowledgement returned by an authenticated write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxAck {
    /// Transaction id assigned by the ledger
    pub tx_id: Uuid,
}

/// External key-value ledger
///
/// Empty bytes returned from `get_data` mean the key is absent.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Whether the ledger currently accepts requests
    async fn is_available(&self) -> Result<bool>;

    /// Identifier of the ledger endpoint (contract address)
    async fn address(&self) -> Result<String>;

    /// Read raw bytes under a key (empty means absent)
    async fn get_data(&self, key: &str) -> Result<Vec<u8>>;

    /// Overwrite the full value under a key
    async fn set_data(&self, key: &str, value: Vec<u8>) -> Result<TxAck>;
}

/// In-memory reference ledger
///
/// Serializes in-process access behind an async lock; this does not add
/// any cross-caller guarantee the real ledger lacks.
#[derive(Debug)]
pub struct MemoryLedger {
    address: String,
    available: AtomicBool,
    cells: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryLedger {
    /// Create an empty ledger with a random endpoint address
    pub fn new() -> Self {
        let addr_bytes: [u8; 20] = rand::random();
        Self::with_address(format!("0x{}", hex::encode(addr_bytes)))
    }

    /// Create an empty ledger with a fixed endpoint address
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            available: AtomicBool::new(true),
            cells: RwLock::new(HashMap::new()),
        }
    }

    /// Toggle availability (for exercising unavailable-ledger paths)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn is_available(&self) -> Result<bool> {
        Ok(self.available.load(Ordering::SeqCst))
    }

    async fn address(&self) -> Result<String> {
        Ok(self.address.clone())
    }

    async fn get_data(&self, key: &str) -> Result<Vec<u8>> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(Error::Ledger("ledger unavailable".to_string()));
        }
        let cells = self.cells.read().await;
        Ok(cells.get(key).cloned().unwrap_or_default())
    }

    async fn set_data(&self, key: &str, value: Vec<u8>) -> Result<TxAck> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(Error::Ledger("ledger unavailable".to_string()));
        }
        let mut cells = self.cells.write().await;
        cells.insert(key.to_string(), value);

        let ack = TxAck { tx_id: Uuid::new_v4() };
        tracing::debug!(key = %key, tx_id = %ack.tx_id, "Ledger write acknowledged");
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_key_is_empty() {
        let ledger = MemoryLedger::new();
        let bytes = ledger.get_data("missing").await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let ledger = MemoryLedger::new();
        ledger.set_data("k", b"payload".to_vec()).await.unwrap();
        assert_eq!(ledger.get_data("k").await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn test_overwrite_is_whole_value() {
        let ledger = MemoryLedger::new();
        ledger.set_data("k", b"first".to_vec()).await.unwrap();
        ledger.set_data("k", b"second".to_vec()).await.unwrap();
        assert_eq!(ledger.get_data("k").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_acks_are_distinct() {
        let ledger = MemoryLedger::new();
        let a = ledger.set_data("k", vec![1]).await.unwrap();
        let b = ledger.set_data("k", vec![2]).await.unwrap();
        assert_ne!(a.tx_id, b.tx_id);
    }

    #[tokio::test]
    async fn test_unavailable_ledger_rejects() {
        let ledger = MemoryLedger::new();
        ledger.set_available(false);
        assert!(!ledger.is_available().await.unwrap());
        assert!(ledger.get_data("k").await.is_err());
        assert!(ledger.set_data("k", vec![]).await.is_err());
    }

    #[tokio::test]
    async fn test_address_is_stable() {
        let ledger = MemoryLedger::with_address("0xfeed");
        assert_eq!(ledger.address().await.unwrap(), "0xfeed");
        assert_eq!(ledger.address().await.unwrap(), "0xfeed");
    }
}
