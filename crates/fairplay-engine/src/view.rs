//! Read-only, display-friendly snapshot of a match.
//!
//! Identities and digests are hex-encoded, integers are native, and
//! revealed moves are given both as their big-endian slot value and as
//! text.

use fairplay_types::{MatchId, MatchRecord, MatchState, RecordKey, Result};
use serde::{Deserialize, Serialize};

use crate::MatchEngine;

/// Decoded view of one match record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub match_id: u64,
    /// Hex of the record's storage name.
    pub record_key: String,
    pub player1: String,
    pub player2: String,
    pub joined: bool,
    pub wager: u64,
    pub state: MatchState,
    pub state_code: u64,
    pub p1_commitment: String,
    pub p2_commitment: String,
    pub p1_move: u64,
    pub p2_move: u64,
    pub p1_move_text: String,
    pub p2_move_text: String,
    pub winner: String,
}

impl MatchView {
    #[must_use]
    pub fn from_record(match_id: MatchId, key: &RecordKey, record: &MatchRecord) -> Self {
        Self {
            match_id: match_id.0,
            record_key: hex::encode(key.as_bytes()),
            player1: record.player1.to_hex(),
            player2: record.player2.to_hex(),
            joined: record.is_joined(),
            wager: record.wager,
            state: record.state,
            state_code: record.state.as_u64(),
            p1_commitment: record.p1_commit.to_hex(),
            p2_commitment: record.p2_commit.to_hex(),
            p1_move: record.p1_move.as_u64(),
            p2_move: record.p2_move.as_u64(),
            p1_move_text: record.p1_move.to_string(),
            p2_move_text: record.p2_move.to_string(),
            winner: record.winner.to_hex(),
        }
    }
}

impl MatchEngine {
    /// Decoded view of a match.
    pub fn view(&self, match_id: MatchId) -> Result<MatchView> {
        let record = self.record(match_id)?;
        let key = self.store().key_for(match_id);
        Ok(MatchView::from_record(match_id, &key, &record))
    }
}
