//! End-to-end lifecycle tests.
//!
//! These drive matches through the public call surface exactly as a
//! client would: positional arguments in, outcomes and decoded records out.

use fairplay_engine::{Call, MatchEngine, Outcome};
use fairplay_types::*;

/// Helper: one engine plus two funded-looking participants.
struct Table {
    engine: MatchEngine,
    alice: Address,
    bob: Address,
}

impl Table {
    fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: MatchEngine::new(config).expect("default config is valid"),
            alice: Address::random(),
            bob: Address::random(),
        }
    }

    fn call(&mut self, call: &Call) -> Result<Outcome> {
        self.engine.dispatch(call)
    }

    fn record(&self, id: MatchId) -> MatchRecord {
        self.engine.record(id).expect("record exists")
    }

    /// create + join, returns the match id.
    fn open_match(&mut self, wager: u64) -> MatchId {
        let id = self
            .call(&Call::create(self.alice, wager))
            .expect("create")
            .match_id();
        self.call(&Call::join(self.bob, id)).expect("join");
        id
    }
}

// =============================================================================
// Test: the reference scenario
// =============================================================================
#[test]
fn e2e_reference_scenario() {
    let mut t = Table::new();

    // create(wager=1000) -> id=1, state=0
    let outcome = t.call(&Call::create(t.alice, 1000)).unwrap();
    assert_eq!(outcome, Outcome::Created(MatchId(1)));
    let rec = t.record(MatchId(1));
    assert_eq!(rec.state, MatchState::Created);
    assert_eq!(rec.player2, Address::ZERO);

    // join(id=1, bob) -> player2=bob
    t.call(&Call::join(t.bob, MatchId(1))).unwrap();
    assert_eq!(t.record(MatchId(1)).player2, t.bob);

    // commit(id=1, alice, H) with H = digest("rock" + "nonceA")
    let h = compute_commitment(b"rock", b"nonceA");
    t.call(&Call::commit(t.alice, MatchId(1), h)).unwrap();
    let rec = t.record(MatchId(1));
    assert_eq!(rec.p1_commit, h);
    assert_eq!(rec.state, MatchState::Committed);

    // reveal(id=1, alice, "rock", "nonceA") -> p1_move="rock", state=3
    t.call(&Call::reveal(t.alice, MatchId(1), b"rock", b"nonceA"))
        .unwrap();
    let rec = t.record(MatchId(1));
    assert_eq!(rec.p1_move, MoveValue::from_revealed(b"rock").unwrap());
    assert_eq!(rec.state, MatchState::Revealed);
}

#[test]
fn e2e_reference_scenario_wrong_move() {
    let mut t = Table::new();
    let id = t.open_match(1000);
    let h = compute_commitment(b"rock", b"nonceA");
    t.call(&Call::commit(t.alice, id, h)).unwrap();

    let err = t
        .call(&Call::reveal(t.alice, id, b"paper", b"nonceA"))
        .unwrap_err();
    assert_eq!(err, FairplayError::CommitmentMismatch(id));
    assert_eq!(t.record(id).state, MatchState::Committed);
    assert!(t.record(id).p1_move.is_zero());
}

// =============================================================================
// Test: full two-sided match through to resolution
// =============================================================================
#[test]
fn e2e_both_players_commit_reveal_resolve() {
    let mut t = Table::new();
    let id = t.open_match(250);

    let (na, nb) = (random_nonce(), random_nonce());
    t.call(&Call::commit(t.alice, id, compute_commitment(b"rock", &na)))
        .unwrap();
    t.call(&Call::commit(t.bob, id, compute_commitment(b"paper", &nb)))
        .unwrap();
    t.call(&Call::reveal(t.alice, id, b"rock", &na)).unwrap();
    t.call(&Call::reveal(t.bob, id, b"paper", &nb)).unwrap();
    assert_eq!(
        t.call(&Call::resolve(t.alice, id)).unwrap(),
        Outcome::Resolved(id)
    );

    let rec = t.record(id);
    assert_eq!(rec.state, MatchState::Resolved);
    assert_eq!(rec.p1_move.to_string(), "rock");
    assert_eq!(rec.p2_move.to_string(), "paper");
    assert_eq!(rec.wager, 250);
    // No adjudication: winner is never written.
    assert_eq!(rec.winner, Address::ZERO);
}

// =============================================================================
// Test: ids are sequential and matches are independent
// =============================================================================
#[test]
fn e2e_matches_are_independent() {
    let mut t = Table::new();
    let first = t.open_match(10);
    let second = t.open_match(20);
    assert_eq!((first, second), (MatchId(1), MatchId(2)));
    assert_eq!(t.engine.match_counter(), MatchId(2));

    let h = compute_commitment(b"rock", b"n");
    t.call(&Call::commit(t.alice, first, h)).unwrap();
    t.call(&Call::resolve(t.bob, second)).unwrap();

    assert_eq!(t.record(first).state, MatchState::Committed);
    assert_eq!(t.record(first).wager, 10);
    assert_eq!(t.record(second).state, MatchState::Resolved);
    assert_eq!(t.record(second).p1_commit, CommitmentHash::ZERO);
    assert_eq!(t.engine.store().len(), 2);
}

#[test]
fn e2e_operations_on_unknown_match() {
    let mut t = Table::new();
    let ghost = MatchId(77);
    let calls = [
        Call::join(t.bob, ghost),
        Call::commit(t.alice, ghost, CommitmentHash([1; 32])),
        Call::reveal(t.alice, ghost, b"rock", b"n"),
        Call::resolve(t.alice, ghost),
    ];
    for call in &calls {
        assert_eq!(t.call(call).unwrap_err(), FairplayError::NotFound(ghost));
    }
    assert!(t.engine.store().is_empty());
}

// =============================================================================
// Test: raw record bytes stay on the fixed layout
// =============================================================================
#[test]
fn e2e_raw_record_layout() {
    let mut t = Table::new();
    let id = t.open_match(1000);
    let h = compute_commitment(b"rock", b"nonceA");
    t.call(&Call::commit(t.alice, id, h)).unwrap();
    t.call(&Call::reveal(t.alice, id, b"rock", b"nonceA"))
        .unwrap();

    let store = t.engine.store();
    let raw = store.raw(store.get(id).unwrap()).unwrap();
    assert_eq!(raw.len(), constants::RECORD_SIZE);
    assert_eq!(&raw[0..32], t.alice.as_bytes());
    assert_eq!(&raw[32..64], t.bob.as_bytes());
    assert_eq!(&raw[64..72], &1000u64.to_be_bytes());
    assert_eq!(&raw[72..80], &3u64.to_be_bytes());
    assert_eq!(&raw[80..112], h.as_bytes());
    assert_eq!(&raw[144..152], b"rock\0\0\0\0");

    // Decoding and re-encoding is byte-for-byte identical.
    assert_eq!(&MatchRecord::decode(raw).unwrap().encode(), raw);
}

// =============================================================================
// Test: closed state machine configuration
// =============================================================================
#[test]
fn e2e_close_after_resolve() {
    let mut t = Table::with_config(EngineConfig {
        close_after_resolve: true,
        ..EngineConfig::default()
    });
    let id = t.open_match(1);
    let na = random_nonce();
    t.call(&Call::commit(t.alice, id, compute_commitment(b"rock", &na)))
        .unwrap();
    t.call(&Call::resolve(t.alice, id)).unwrap();

    let err = t
        .call(&Call::reveal(t.alice, id, b"rock", &na))
        .unwrap_err();
    assert_eq!(err, FairplayError::MatchClosed(id));
    assert!(t.call(&Call::resolve(t.bob, id)).is_ok());
    assert_eq!(t.record(id).state, MatchState::Resolved);
}
