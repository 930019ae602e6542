//! End-to-end flow over the in-memory reference ledger
//!
//! Exercises the full lifecycle the way a session would drive it:
//! propose → index grows → counterparty accepts → authenticated decrypt
//! reveals the bumped score.

use aura_core::codec::ReferenceCodec;
use aura_core::ledger::{Ledger, MemoryLedger};
use aura_core::registry::INDEX_KEY;
use aura_core::signer::{LocalSigner, Signer};
use aura_core::types::MatchStatus;
use matching::{Config, DecryptSession, MatchEngine, MatchStats};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

fn fast_config() -> Config {
    let mut config = Config::default();
    config.session.decrypt_latency_ms = 0;
    config.session.session_key_bytes = 32;
    config
}

#[tokio::test]
async fn test_propose_accept_decrypt_flow() {
    init_tracing();

    let ledger = Arc::new(MemoryLedger::new());
    let signer = Arc::new(LocalSigner::from_seed(&[11u8; 32]));
    let engine = MatchEngine::new(ledger.clone(), signer.clone(), fast_config());

    // Propose with two interests and a known pre-accept score
    let id = engine
        .propose_with_scores(vec!["Web3".to_string(), "Art".to_string()], 320.0, 50.0)
        .await
        .unwrap();

    // Index gained exactly one entry
    let index: Vec<String> =
        serde_json::from_slice(&ledger.get_data(INDEX_KEY).await.unwrap()).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0], id.as_str());

    // Fresh snapshot is pending with the proposed interests
    let record = engine.registry().get_one(&id).await.unwrap();
    assert_eq!(record.status, MatchStatus::Pending);
    assert_eq!(record.interests, vec!["Web3", "Art"]);

    // Counterparty accepts
    let accepted = engine.verify_match(&id).await.unwrap();
    assert_eq!(accepted.status, MatchStatus::Matched);

    // Authenticated decrypt reveals the 1.10x acceptance bump
    let mut session = DecryptSession::initialize(
        ledger.as_ref(),
        signer,
        Arc::new(ReferenceCodec),
        &fast_config(),
    )
    .await
    .unwrap();

    let revealed = session.decrypt_compatibility(&accepted).await.unwrap();
    assert!((revealed - 55.0).abs() < 1e-9);

    // Hide is a view action only; decrypting again is deterministic
    session.hide(&accepted.id);
    let again = session.decrypt_compatibility(&accepted).await.unwrap();
    assert_eq!(revealed, again);
}

#[tokio::test]
async fn test_view_survives_partial_corruption() {
    init_tracing();

    let ledger = Arc::new(MemoryLedger::new());
    let signer = Arc::new(LocalSigner::from_seed(&[12u8; 32]));
    let engine = MatchEngine::new(ledger.clone(), signer, fast_config());

    let keep = engine.propose(vec!["Music".to_string()]).await.unwrap();
    let corrupt = engine.propose(vec!["Food".to_string()]).await.unwrap();

    // Someone else scribbled over one record
    ledger
        .set_data(&format!("match_{}", corrupt), b"%%garbage%%".to_vec())
        .await
        .unwrap();

    let view = engine.load_matches().await.unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, keep);

    let stats = MatchStats::from_records(&view);
    assert_eq!(stats.total, 1);
    assert_eq!(stats.pending, 1);
}

#[tokio::test]
async fn test_two_sessions_share_one_ledger() {
    init_tracing();

    let ledger = Arc::new(MemoryLedger::new());
    let alice = Arc::new(LocalSigner::from_seed(&[21u8; 32]));
    let bob = Arc::new(LocalSigner::from_seed(&[22u8; 32]));

    let alice_engine = MatchEngine::new(ledger.clone(), alice.clone(), fast_config());
    let bob_engine = MatchEngine::new(ledger.clone(), bob.clone(), fast_config());

    let alice_match = alice_engine.propose(vec!["Gaming".to_string()]).await.unwrap();
    let bob_match = bob_engine.propose(vec!["Tech".to_string()]).await.unwrap();

    // Both appends survived sequential proposals
    let view = alice_engine.load_matches().await.unwrap();
    assert_eq!(view.len(), 2);

    // Bob cannot accept Alice's match, only his own
    assert!(bob_engine.verify_match(&alice_match).await.is_err());
    let accepted = bob_engine.verify_match(&bob_match).await.unwrap();
    assert_eq!(accepted.status, MatchStatus::Matched);

    // Alice's view reflects Bob's acceptance on the shared ledger
    let view = alice_engine.load_matches().await.unwrap();
    let stats = MatchStats::from_records(&view);
    assert_eq!(stats.matched, 1);
    assert_eq!(stats.pending, 1);

    // Identities stay distinct
    assert_ne!(
        alice.identity().unwrap().as_str(),
        bob.identity().unwrap().as_str()
    );
}
