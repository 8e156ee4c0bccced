//! Identifiers used throughout FairPlay.
//!
//! Participant identities are raw 32-byte account addresses supplied by the
//! authenticated sender of a call. Match identifiers are issued by the
//! match counter and never reused.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DIGEST_WIDTH, IDENTITY_WIDTH};

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A participant identity: the raw 32-byte account address of a caller.
///
/// [`Address::ZERO`] is the sentinel for an unfilled seat and is never a
/// valid caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub [u8; IDENTITY_WIDTH]);

impl Address {
    /// The all-zero sentinel.
    pub const ZERO: Self = Self([0u8; IDENTITY_WIDTH]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; IDENTITY_WIDTH]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; IDENTITY_WIDTH] {
        &self.0
    }

    /// Returns `true` for the unfilled-seat sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; IDENTITY_WIDTH]
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "addr:{}", hex::encode(&self.0[..8]))
    }
}

/// Random non-zero address for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl Address {
    pub fn random() -> Self {
        loop {
            let candidate = Self(rand::random::<[u8; IDENTITY_WIDTH]>());
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MatchId
// ---------------------------------------------------------------------------

/// Monotonically increasing match identifier issued by the match counter.
///
/// The first issued identifier is 1; 0 means "nothing issued yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl MatchId {
    /// The successor identifier, or `None` if the space is exhausted.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    #[must_use]
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "match:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// RecordKey
// ---------------------------------------------------------------------------

/// Deterministic storage name of a match record.
///
/// Format: `prefix || be_u64(match_id)`, e.g. `b"match_" ++ [0,0,0,0,0,0,0,1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RecordKey(pub Vec<u8>);

impl RecordKey {
    #[must_use]
    pub fn derive(prefix: &[u8], match_id: MatchId) -> Self {
        let mut name = Vec::with_capacity(prefix.len() + 8);
        name.extend_from_slice(prefix);
        name.extend_from_slice(&match_id.to_be_bytes());
        Self(name)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

// ---------------------------------------------------------------------------
// CommitmentHash
// ---------------------------------------------------------------------------

/// A 32-byte commitment digest: `SHA-256(move || nonce)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitmentHash(pub [u8; DIGEST_WIDTH]);

impl CommitmentHash {
    /// The value of a commit slot nobody has written yet.
    pub const ZERO: Self = Self([0u8; DIGEST_WIDTH]);

    /// Parse a commitment from a raw call argument.
    ///
    /// # Errors
    /// Returns `LengthMismatch` unless `bytes` is exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> crate::Result<Self> {
        let digest: [u8; DIGEST_WIDTH] =
            bytes
                .try_into()
                .map_err(|_| crate::FairplayError::LengthMismatch {
                    expected: DIGEST_WIDTH,
                    got: bytes.len(),
                })?;
        Ok(Self(digest))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; DIGEST_WIDTH] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for CommitmentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
