//! Move commitments.
//!
//! A participant publishes `SHA-256(move || nonce)` before either move is
//! known, then later discloses `(move, nonce)`. The reveal is accepted only
//! when the recomputed digest equals the stored commitment exactly.
//!
//! There is no domain separator: the preimage is the plain concatenation,
//! so commitments produced by existing clients verify unchanged.

use sha2::{Digest, Sha256};

use crate::CommitmentHash;

/// Compute the commitment for a move and its secret nonce.
#[must_use]
pub fn compute_commitment(move_bytes: &[u8], nonce: &[u8]) -> CommitmentHash {
    let mut hasher = Sha256::new();
    hasher.update(move_bytes);
    hasher.update(nonce);
    CommitmentHash(hasher.finalize().into())
}

/// Check a disclosed `(move, nonce)` pair against a stored commitment.
#[must_use]
pub fn verify_commitment(move_bytes: &[u8], nonce: &[u8], expected: &CommitmentHash) -> bool {
    compute_commitment(move_bytes, nonce) == *expected
}

/// Random 32-byte nonce for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
#[must_use]
pub fn random_nonce() -> [u8; 32] {
    rand::random::<[u8; 32]>()
}
