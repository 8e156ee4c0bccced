//! The match lifecycle state machine.
//!
//! ```text
//!   create ──▶ CREATED ──commit──▶ COMMITTED ──reveal──▶ REVEALED ──resolve──▶ RESOLVED
//!                 │
//!               join (fills player2, no state change)
//! ```
//!
//! `commit`, `reveal` and `resolve` set their target state unconditionally.
//! With `close_after_resolve` enabled, a resolved match rejects everything
//! except another `resolve`.

use fairplay_store::{MatchCounter, MatchStore, RecordHandle};
use fairplay_types::{
    Address, CommitmentHash, EngineConfig, FairplayError, Field, MatchId, MatchRecord,
    MatchState, MoveValue, Result, constants, verify_commitment,
};

/// Owns the match counter and the match store, and applies protocol operations.
pub struct MatchEngine {
    config: EngineConfig,
    counter: MatchCounter,
    store: MatchStore,
}

impl MatchEngine {
    /// Module initialization: the counter starts at zero, the store is empty.
    ///
    /// # Errors
    /// Returns `Configuration` if `config` is invalid.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            protocol = constants::PROTOCOL_NAME,
            version = constants::VERSION,
            record_prefix = %config.record_prefix,
            close_after_resolve = config.close_after_resolve,
            "Match engine initialized"
        );
        let store = MatchStore::new(config.record_prefix_bytes());
        Ok(Self {
            config,
            counter: MatchCounter::new(),
            store,
        })
    }

    /// Open a new match with `caller` in the first seat.
    ///
    /// # Errors
    /// - `ZeroAddressCaller` if `caller` is the sentinel
    /// - `CounterExhausted` if no id can be issued
    pub fn create(&mut self, caller: Address, wager: u64) -> Result<MatchId> {
        let caller = require_caller(caller)?;
        let match_id = self
            .counter
            .peek_next()
            .ok_or(FairplayError::CounterExhausted)?;

        let record = MatchRecord::new(caller, wager);
        let handle = self.store.allocate(match_id)?;
        self.store.apply(
            handle,
            &[
                record.write_for(Field::Player1),
                record.write_for(Field::Wager),
            ],
        )?;
        self.counter.issue()?;

        tracing::info!(%match_id, player1 = %caller, wager, "Match created");
        Ok(match_id)
    }

    /// Take the second seat of an open match.
    ///
    /// # Errors
    /// - `NotFound`, `ZeroAddressCaller`, `MatchClosed`
    /// - `AlreadyJoined` if the seat is taken (checked first, whoever calls)
    /// - `SelfJoin` if `caller` created the match
    pub fn join(&mut self, match_id: MatchId, caller: Address) -> Result<()> {
        let caller = require_caller(caller)?;
        let (handle, mut record) = self.open(match_id)?;

        if record.is_joined() {
            return Err(FairplayError::AlreadyJoined(match_id));
        }
        if caller == record.player1 {
            return Err(FairplayError::SelfJoin(match_id));
        }

        record.player2 = caller;
        self.store
            .apply(handle, &[record.write_for(Field::Player2)])?;

        tracing::info!(%match_id, player2 = %caller, "Match joined");
        Ok(())
    }

    /// Publish (or overwrite) the caller's move commitment.
    ///
    /// # Errors
    /// - `NotFound`, `ZeroAddressCaller`, `MatchClosed`
    /// - `NotParticipant` if `caller` holds neither seat
    pub fn commit(
        &mut self,
        match_id: MatchId,
        caller: Address,
        commitment: CommitmentHash,
    ) -> Result<()> {
        let caller = require_caller(caller)?;
        let (handle, mut record) = self.open(match_id)?;
        let seat = record
            .seat_of(&caller)
            .ok_or(FairplayError::NotParticipant(match_id))?;

        if *record.commitment(seat) != CommitmentHash::ZERO {
            tracing::debug!(%match_id, %seat, "Overwriting earlier commitment");
        }
        record.set_commitment(seat, commitment);
        advance(&mut record, match_id, MatchState::Committed);
        self.store.apply(
            handle,
            &[
                record.write_for(seat.commit_field()),
                record.write_for(Field::State),
            ],
        )?;

        tracing::debug!(%match_id, %seat, commitment = %commitment, "Move committed");
        Ok(())
    }

    /// Disclose the caller's move and nonce.
    ///
    /// # Errors
    /// - `NotFound`, `ZeroAddressCaller`, `MatchClosed`, `NotParticipant`
    /// - `CommitmentMismatch` if `SHA-256(move || nonce)` is not the stored commitment
    /// - `LengthMismatch` if the move does not fit its 8-byte slot
    pub fn reveal(
        &mut self,
        match_id: MatchId,
        caller: Address,
        move_bytes: &[u8],
        nonce: &[u8],
    ) -> Result<()> {
        let caller = require_caller(caller)?;
        let (handle, mut record) = self.open(match_id)?;
        let seat = record
            .seat_of(&caller)
            .ok_or(FairplayError::NotParticipant(match_id))?;

        if !verify_commitment(move_bytes, nonce, record.commitment(seat)) {
            tracing::warn!(%match_id, %seat, caller = %caller, "Reveal does not match commitment");
            return Err(FairplayError::CommitmentMismatch(match_id));
        }
        let value = MoveValue::from_revealed(move_bytes)?;

        record.set_move(seat, value);
        advance(&mut record, match_id, MatchState::Revealed);
        self.store.apply(
            handle,
            &[
                record.write_for(seat.move_field()),
                record.write_for(Field::State),
            ],
        )?;

        tracing::debug!(%match_id, %seat, revealed = %value, "Move revealed");
        Ok(())
    }

    /// Mark the match terminal. Idempotent; computes no outcome.
    ///
    /// # Errors
    /// Returns `NotFound` if the match does not exist.
    pub fn resolve(&mut self, match_id: MatchId) -> Result<()> {
        let handle = self.store.get(match_id)?;
        let mut record = self.store.load(handle)?;

        advance(&mut record, match_id, MatchState::Resolved);
        self.store
            .apply(handle, &[record.write_for(Field::State)])?;

        tracing::info!(%match_id, "Match resolved");
        Ok(())
    }

    /// Decoded snapshot of a match record.
    pub fn record(&self, match_id: MatchId) -> Result<MatchRecord> {
        let handle = self.store.get(match_id)?;
        self.store.load(handle)
    }

    /// The most recently issued match id (`MatchId(0)` before any create).
    #[must_use]
    pub fn match_counter(&self) -> MatchId {
        self.counter.current()
    }

    #[must_use]
    pub fn store(&self) -> &MatchStore {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Locate and decode a record that still accepts player operations.
    fn open(&self, match_id: MatchId) -> Result<(RecordHandle, MatchRecord)> {
        let handle = self.store.get(match_id)?;
        let record = self.store.load(handle)?;
        if self.config.close_after_resolve && record.state.is_terminal() {
            return Err(FairplayError::MatchClosed(match_id));
        }
        Ok((handle, record))
    }
}

fn require_caller(caller: Address) -> Result<Address> {
    if caller.is_zero() {
        return Err(FairplayError::ZeroAddressCaller);
    }
    Ok(caller)
}

/// Set the lifecycle state, noting when a call moves it backwards.
fn advance(record: &mut MatchRecord, match_id: MatchId, target: MatchState) {
    if !record.state.is_forward(target) {
        tracing::warn!(
            %match_id,
            from = %record.state,
            to = %target,
            "Lifecycle state moved backwards"
        );
    }
    record.state = target;
}
