//! The persisted match record and its fixed 192-byte layout.
//!
//! ```text
//!  offset  width  field
//!  ──────  ─────  ─────────────────────────────────────────────
//!     0     32    player1     creator address
//!    32     32    player2     joiner address, zero = unjoined
//!    64      8    wager       be_u64, immutable after create
//!    72      8    state       be_u64 lifecycle value
//!    80     32    p1_commit   SHA-256(move || nonce)
//!   112     32    p2_commit
//!   144      8    p1_move     revealed move, zero-padded
//!   152      8    p2_move
//!   160     32    winner      never written by this protocol
//! ```
//!
//! [`Field`] is the only place offsets live. Everything else reads and
//! writes through [`MatchRecord::encode`], [`MatchRecord::decode`] and
//! [`MatchRecord::write_for`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DIGEST_WIDTH, IDENTITY_WIDTH, MOVE_WIDTH, RECORD_SIZE, U64_WIDTH};
use crate::{Address, CommitmentHash, FairplayError, MatchState, Result};

// ---------------------------------------------------------------------------
// Field table
// ---------------------------------------------------------------------------

/// One slot of the record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Player1,
    Player2,
    Wager,
    State,
    P1Commit,
    P2Commit,
    P1Move,
    P2Move,
    Winner,
}

impl Field {
    /// All fields in layout order.
    pub const ALL: [Self; 9] = [
        Self::Player1,
        Self::Player2,
        Self::Wager,
        Self::State,
        Self::P1Commit,
        Self::P2Commit,
        Self::P1Move,
        Self::P2Move,
        Self::Winner,
    ];

    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Self::Player1 => 0,
            Self::Player2 => 32,
            Self::Wager => 64,
            Self::State => 72,
            Self::P1Commit => 80,
            Self::P2Commit => 112,
            Self::P1Move => 144,
            Self::P2Move => 152,
            Self::Winner => 160,
        }
    }

    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Player1 | Self::Player2 | Self::Winner => IDENTITY_WIDTH,
            Self::Wager | Self::State => U64_WIDTH,
            Self::P1Commit | Self::P2Commit => DIGEST_WIDTH,
            Self::P1Move | Self::P2Move => MOVE_WIDTH,
        }
    }

    /// One past the last byte of the slot.
    #[must_use]
    pub const fn end(self) -> usize {
        self.offset() + self.width()
    }

    /// The field whose slot covers byte `offset`, if any.
    #[must_use]
    pub fn containing(offset: usize) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.offset() <= offset && offset < f.end())
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Player1 => "player1",
            Self::Player2 => "player2",
            Self::Wager => "wager",
            Self::State => "state",
            Self::P1Commit => "p1_commit",
            Self::P2Commit => "p2_commit",
            Self::P1Move => "p1_move",
            Self::P2Move => "p2_move",
            Self::Winner => "winner",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name(), self.offset())
    }
}

// The table must tile the record exactly.
const _: () = assert!(Field::Winner.end() == RECORD_SIZE);

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// Which side of the match a caller occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Player1,
    Player2,
}

impl Seat {
    #[must_use]
    pub fn commit_field(self) -> Field {
        match self {
            Self::Player1 => Field::P1Commit,
            Self::Player2 => Field::P2Commit,
        }
    }

    #[must_use]
    pub fn move_field(self) -> Field {
        match self {
            Self::Player1 => Field::P1Move,
            Self::Player2 => Field::P2Move,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player1 => write!(f, "player1"),
            Self::Player2 => write!(f, "player2"),
        }
    }
}

// ---------------------------------------------------------------------------
// MoveValue
// ---------------------------------------------------------------------------

/// A revealed move as it sits in its 8-byte slot.
///
/// Moves shorter than the slot are stored left-aligned with zero padding,
/// so `"rock"` is `72 6f 63 6b 00 00 00 00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MoveValue(pub [u8; MOVE_WIDTH]);

impl MoveValue {
    pub const ZERO: Self = Self([0u8; MOVE_WIDTH]);

    /// Place revealed move bytes into a slot value.
    ///
    /// # Errors
    /// Returns `LengthMismatch` if the move is longer than the slot.
    pub fn from_revealed(move_bytes: &[u8]) -> Result<Self> {
        if move_bytes.len() > MOVE_WIDTH {
            return Err(FairplayError::LengthMismatch {
                expected: MOVE_WIDTH,
                got: move_bytes.len(),
            });
        }
        let mut slot = [0u8; MOVE_WIDTH];
        slot[..move_bytes.len()].copy_from_slice(move_bytes);
        Ok(Self(slot))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; MOVE_WIDTH] {
        &self.0
    }

    /// The slot read as a big-endian integer, the way clients decode it.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    /// Slot contents without the trailing zero padding.
    #[must_use]
    pub fn trimmed(&self) -> &[u8] {
        let len = self.0.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        &self.0[..len]
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; MOVE_WIDTH]
    }
}

impl fmt::Display for MoveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.trimmed()))
    }
}

// ---------------------------------------------------------------------------
// FieldWrite
// ---------------------------------------------------------------------------

/// A pending in-place overwrite of one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWrite {
    pub field: Field,
    pub bytes: Vec<u8>,
}

impl FieldWrite {
    #[must_use]
    pub fn offset(&self) -> usize {
        self.field.offset()
    }
}

// ---------------------------------------------------------------------------
// MatchRecord
// ---------------------------------------------------------------------------

/// The full state of one match, typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player1: Address,
    pub player2: Address,
    pub wager: u64,
    pub state: MatchState,
    pub p1_commit: CommitmentHash,
    pub p2_commit: CommitmentHash,
    pub p1_move: MoveValue,
    pub p2_move: MoveValue,
    pub winner: Address,
}

impl MatchRecord {
    /// A freshly created lobby: everything zero except creator and wager.
    #[must_use]
    pub fn new(player1: Address, wager: u64) -> Self {
        Self {
            player1,
            player2: Address::ZERO,
            wager,
            state: MatchState::Created,
            p1_commit: CommitmentHash::ZERO,
            p2_commit: CommitmentHash::ZERO,
            p1_move: MoveValue::ZERO,
            p2_move: MoveValue::ZERO,
            winner: Address::ZERO,
        }
    }

    /// Has the second seat been taken?
    #[must_use]
    pub fn is_joined(&self) -> bool {
        !self.player2.is_zero()
    }

    /// The seat `caller` occupies, if any. The zero address never has one.
    #[must_use]
    pub fn seat_of(&self, caller: &Address) -> Option<Seat> {
        if caller.is_zero() {
            None
        } else if *caller == self.player1 {
            Some(Seat::Player1)
        } else if *caller == self.player2 {
            Some(Seat::Player2)
        } else {
            None
        }
    }

    #[must_use]
    pub fn commitment(&self, seat: Seat) -> &CommitmentHash {
        match seat {
            Seat::Player1 => &self.p1_commit,
            Seat::Player2 => &self.p2_commit,
        }
    }

    pub fn set_commitment(&mut self, seat: Seat, commitment: CommitmentHash) {
        match seat {
            Seat::Player1 => self.p1_commit = commitment,
            Seat::Player2 => self.p2_commit = commitment,
        }
    }

    #[must_use]
    pub fn revealed_move(&self, seat: Seat) -> &MoveValue {
        match seat {
            Seat::Player1 => &self.p1_move,
            Seat::Player2 => &self.p2_move,
        }
    }

    pub fn set_move(&mut self, seat: Seat, value: MoveValue) {
        match seat {
            Seat::Player1 => self.p1_move = value,
            Seat::Player2 => self.p2_move = value,
        }
    }

    /// Encode a single field exactly as it appears in the record.
    #[must_use]
    pub fn field_bytes(&self, field: Field) -> Vec<u8> {
        match field {
            Field::Player1 => self.player1.0.to_vec(),
            Field::Player2 => self.player2.0.to_vec(),
            Field::Wager => self.wager.to_be_bytes().to_vec(),
            Field::State => self.state.as_u64().to_be_bytes().to_vec(),
            Field::P1Commit => self.p1_commit.0.to_vec(),
            Field::P2Commit => self.p2_commit.0.to_vec(),
            Field::P1Move => self.p1_move.0.to_vec(),
            Field::P2Move => self.p2_move.0.to_vec(),
            Field::Winner => self.winner.0.to_vec(),
        }
    }

    /// The overwrite that brings a stored record's `field` in line with this one.
    #[must_use]
    pub fn write_for(&self, field: Field) -> FieldWrite {
        FieldWrite {
            field,
            bytes: self.field_bytes(field),
        }
    }

    /// Encode into the fixed 192-byte layout.
    #[must_use]
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        for field in Field::ALL {
            buf[field.offset()..field.end()].copy_from_slice(&self.field_bytes(field));
        }
        buf
    }

    /// Decode the fixed 192-byte layout.
    ///
    /// # Errors
    /// - `LengthMismatch` if `bytes` is not exactly 192 bytes
    /// - `InvalidState` if the `state` slot holds an unknown value
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != RECORD_SIZE {
            return Err(FairplayError::LengthMismatch {
                expected: RECORD_SIZE,
                got: bytes.len(),
            });
        }

        Ok(Self {
            player1: Address(array32(bytes, Field::Player1)),
            player2: Address(array32(bytes, Field::Player2)),
            wager: be_u64(bytes, Field::Wager),
            state: MatchState::from_u64(be_u64(bytes, Field::State))?,
            p1_commit: CommitmentHash(array32(bytes, Field::P1Commit)),
            p2_commit: CommitmentHash(array32(bytes, Field::P2Commit)),
            p1_move: MoveValue(array8(bytes, Field::P1Move)),
            p2_move: MoveValue(array8(bytes, Field::P2Move)),
            winner: Address(array32(bytes, Field::Winner)),
        })
    }
}

// Callers have already checked `bytes.len() == RECORD_SIZE`.

fn array32(bytes: &[u8], field: Field) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes[field.offset()..field.end()]);
    out
}

fn array8(bytes: &[u8], field: Field) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&bytes[field.offset()..field.end()]);
    out
}

fn be_u64(bytes: &[u8], field: Field) -> u64 {
    u64::from_be_bytes(array8(bytes, field))
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::compute_commitment;

    fn populated() -> MatchRecord {
        let mut rec = MatchRecord::new(Address::from_bytes([0x11; 32]), 1000);
        rec.player2 = Address::from_bytes([0x22; 32]);
        rec.state = MatchState::Revealed;
        rec.p1_commit = compute_commitment(b"rock", b"nonceA");
        rec.p2_commit = compute_commitment(b"paper", b"nonceB");
        rec.p1_move = MoveValue::from_revealed(b"rock").unwrap();
        rec.p2_move = MoveValue::from_revealed(b"paper").unwrap();
        rec
    }

    #[test]
    fn field_table_tiles_record() {
        let mut cursor = 0;
        for field in Field::ALL {
            assert_eq!(field.offset(), cursor, "gap before {field}");
            cursor = field.end();
        }
        assert_eq!(cursor, RECORD_SIZE);
    }

    #[test]
    fn new_record_is_zero_except_creator_and_wager() {
        let rec = MatchRecord::new(Address::from_bytes([0x11; 32]), 1000);
        let bytes = rec.encode();
        assert_eq!(&bytes[0..32], &[0x11; 32]);
        assert_eq!(&bytes[64..72], &1000u64.to_be_bytes());
        assert!(bytes[32..64].iter().all(|b| *b == 0));
        assert!(bytes[72..].iter().all(|b| *b == 0));
        assert!(!rec.is_joined());
    }

    #[test]
    fn encode_places_fields_at_their_offsets() {
        let rec = populated();
        let bytes = rec.encode();
        assert_eq!(&bytes[32..64], &[0x22; 32]);
        assert_eq!(&bytes[72..80], &3u64.to_be_bytes());
        assert_eq!(&bytes[80..112], rec.p1_commit.as_bytes());
        assert_eq!(&bytes[112..144], rec.p2_commit.as_bytes());
        assert_eq!(&bytes[144..152], b"rock\0\0\0\0");
        assert_eq!(&bytes[152..160], b"paper\0\0\0");
        assert!(bytes[160..192].iter().all(|b| *b == 0));
    }

    #[test]
    fn decode_reproduces_every_byte() {
        let rec = populated();
        let bytes = rec.encode();
        let back = MatchRecord::decode(&bytes).unwrap();
        assert_eq!(back, rec);
        assert_eq!(back.encode(), bytes);
    }

    #[test]
    fn random_records_roundtrip() {
        let states = [
            MatchState::Created,
            MatchState::Committed,
            MatchState::Revealed,
            MatchState::Resolved,
        ];
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let move_len = rng.gen_range(0..=MOVE_WIDTH);
            let p1_move: Vec<u8> = (0..move_len).map(|_| rng.r#gen()).collect();
            let rec = MatchRecord {
                player1: Address::random(),
                player2: Address(rng.r#gen()),
                wager: rng.r#gen(),
                state: states[rng.gen_range(0..states.len())],
                p1_commit: CommitmentHash(rng.r#gen()),
                p2_commit: CommitmentHash(rng.r#gen()),
                p1_move: MoveValue::from_revealed(&p1_move).unwrap(),
                p2_move: MoveValue(rng.r#gen()),
                winner: Address(rng.r#gen()),
            };
            let bytes = rec.encode();
            let back = MatchRecord::decode(&bytes).unwrap();
            assert_eq!(back, rec);
            assert_eq!(back.encode(), bytes);
        }
    }

    #[test]
    fn field_containing_offset() {
        assert_eq!(Field::containing(0), Some(Field::Player1));
        assert_eq!(Field::containing(72), Some(Field::State));
        assert_eq!(Field::containing(73), Some(Field::State));
        assert_eq!(Field::containing(100), Some(Field::P1Commit));
        assert_eq!(Field::containing(191), Some(Field::Winner));
        assert_eq!(Field::containing(192), None);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let err = MatchRecord::decode(&[0u8; 191]).unwrap_err();
        assert_eq!(
            err,
            FairplayError::LengthMismatch {
                expected: 192,
                got: 191
            }
        );
    }

    #[test]
    fn decode_rejects_reserved_state() {
        let mut bytes = MatchRecord::new(Address::from_bytes([1; 32]), 5).encode();
        bytes[72..80].copy_from_slice(&1u64.to_be_bytes());
        assert_eq!(
            MatchRecord::decode(&bytes).unwrap_err(),
            FairplayError::InvalidState(1)
        );
    }

    #[test]
    fn write_for_matches_slot_width() {
        let rec = populated();
        for field in Field::ALL {
            let write = rec.write_for(field);
            assert_eq!(write.bytes.len(), field.width(), "{field}");
            assert_eq!(write.offset(), field.offset());
        }
    }

    #[test]
    fn seat_lookup() {
        let rec = populated();
        assert_eq!(rec.seat_of(&rec.player1), Some(Seat::Player1));
        assert_eq!(rec.seat_of(&rec.player2), Some(Seat::Player2));
        assert_eq!(rec.seat_of(&Address::from_bytes([0x33; 32])), None);
    }

    #[test]
    fn zero_address_has_no_seat_in_unjoined_match() {
        let rec = MatchRecord::new(Address::from_bytes([0x11; 32]), 1);
        assert_eq!(rec.seat_of(&Address::ZERO), None);
    }

    #[test]
    fn seat_fields() {
        assert_eq!(Seat::Player1.commit_field(), Field::P1Commit);
        assert_eq!(Seat::Player2.commit_field(), Field::P2Commit);
        assert_eq!(Seat::Player1.move_field(), Field::P1Move);
        assert_eq!(Seat::Player2.move_field(), Field::P2Move);
    }

    #[test]
    fn move_value_padding() {
        let mv = MoveValue::from_revealed(b"rock").unwrap();
        assert_eq!(mv.as_bytes(), b"rock\0\0\0\0");
        assert_eq!(mv.trimmed(), b"rock");
        assert_eq!(format!("{mv}"), "rock");

        let full = MoveValue::from_revealed(b"12345678").unwrap();
        assert_eq!(full.trimmed(), b"12345678");
    }

    #[test]
    fn move_value_too_long() {
        let err = MoveValue::from_revealed(b"lizard-spock").unwrap_err();
        assert_eq!(
            err,
            FairplayError::LengthMismatch {
                expected: 8,
                got: 12
            }
        );
    }

    #[test]
    fn numeric_move_reads_big_endian() {
        let mv = MoveValue::from_revealed(&2u64.to_be_bytes()).unwrap();
        assert_eq!(mv.as_u64(), 2);
    }
}
