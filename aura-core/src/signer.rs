//! Signing collaborator contract
//!
//! This module provides:
//! - The async `Signer` trait the decryption flow awaits on
//! - Ed25519 key pair generation, signing, and verification
//! - Address derivation from a public key
//!
//! The real collaborator is a wallet: `sign_message` suspends until the
//! user approves or declines. `LocalSigner` is the in-process reference
//! used by tests and tooling.

use crate::{
    error::{Error, Result},
    types::Identity,
};
use async_trait::async_trait;
use ed25519_dalek::{Signature as DalekSignature, Signer as _, SigningKey, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};

/// Detached signature over a challenge message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSignature {
    bytes: [u8; 64],
}

impl MessageSignature {
    /// Create from bytes
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self { bytes }
    }

    /// Get bytes
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.bytes
    }

    /// Verify against a message and public key
    pub fn verify(&self, message: &[u8], public_key: &[u8; 32]) -> bool {
        let signature = DalekSignature::from_bytes(&self.bytes);

        let verifying_key = match VerifyingKey::from_bytes(public_key) {
            Ok(key) => key,
            Err(_) => return false,
        };

        verifying_key.verify(message, &signature).is_ok()
    }
}

/// Signing collaborator bound to at most one identity
#[async_trait]
pub trait Signer: Send + Sync {
    /// Identity currently bound to the session, if any
    fn identity(&self) -> Option<Identity>;

    /// Sign a challenge message; fails if the holder declines
    async fn sign_message(&self, message: &str) -> Result<MessageSignature>;
}

/// Ed25519 key pair
#[derive(Debug)]
pub struct KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl KeyPair {
    /// Generate a new random key pair
    pub fn generate() -> Self {
        let signing_key = SigningKey::from_bytes(&rand::random::<[u8; 32]>());
        let verifying_key = signing_key.verifying_key();

        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Create from seed (32 bytes) - deterministic generation
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let verifying_key = signing_key.verifying_key();

        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Get public key bytes
    pub fn public_key(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> MessageSignature {
        let signature = self.signing_key.sign(message);
        MessageSignature::from_bytes(signature.to_bytes())
    }

    /// Verify a signature
    pub fn verify(&self, message: &[u8], signature: &MessageSignature) -> Result<()> {
        let dalek_sig = DalekSignature::from_bytes(signature.as_bytes());
        self.verifying_key
            .verify(message, &dalek_sig)
            .map_err(|e| Error::Signature(format!("Verification failed: {}", e)))
    }
}

/// Derive an address-like identity from a public key
///
/// SHA-256 of the key, last 20 bytes, hex with `0x` prefix.
pub fn derive_address(public_key: &[u8; 32]) -> Identity {
    let digest = Sha256::digest(public_key);
    Identity::new(format!("0x{}", hex::encode(&digest[12..])))
}

/// In-process signer backed by a local key pair
///
/// Always approves; wallet-style decline paths are exercised with test
/// doubles at the call site.
#[derive(Debug)]
pub struct LocalSigner {
    keypair: KeyPair,
    identity: Identity,
}

impl LocalSigner {
    /// Generate a signer with a fresh key pair
    pub fn generate() -> Self {
        Self::from_keypair(KeyPair::generate())
    }

    /// Deterministic signer from a seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::from_keypair(KeyPair::from_seed(seed))
    }

    /// Wrap an existing key pair
    pub fn from_keypair(keypair: KeyPair) -> Self {
        let identity = derive_address(&keypair.public_key());
        Self { keypair, identity }
    }

    /// Public key bytes of the underlying pair
    pub fn public_key(&self) -> [u8; 32] {
        self.keypair.public_key()
    }
}

#[async_trait]
impl Signer for LocalSigner {
    fn identity(&self) -> Option<Identity> {
        Some(self.identity.clone())
    }

    async fn sign_message(&self, message: &str) -> Result<MessageSignature> {
        Ok(self.keypair.sign(message.as_bytes()))
    }
}
