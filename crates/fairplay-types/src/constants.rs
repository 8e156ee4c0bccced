//! System-wide constants for the FairPlay match protocol.

/// Width in bytes of one persisted match record.
pub const RECORD_SIZE: usize = 192;

/// Width of a participant identity (an account address).
pub const IDENTITY_WIDTH: usize = 32;

/// Width of a big-endian `u64` slot (wager, state).
pub const U64_WIDTH: usize = 8;

/// Width of a commitment digest (SHA-256 output).
pub const DIGEST_WIDTH: usize = 32;

/// Width of a revealed move slot.
pub const MOVE_WIDTH: usize = 8;

/// Storage name prefix for match records: `prefix || be_u64(match_id)`.
pub const DEFAULT_RECORD_PREFIX: &str = "match_";

/// Operation name: open a new match lobby.
pub const OP_CREATE: &str = "create";

/// Operation name: take the second seat.
pub const OP_JOIN: &str = "join";

/// Operation name: publish a move commitment.
pub const OP_COMMIT: &str = "commit";

/// Operation name: disclose the committed move and nonce.
pub const OP_REVEAL: &str = "reveal";

/// Operation name: mark the match terminal.
pub const OP_RESOLVE: &str = "resolve";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Protocol name.
pub const PROTOCOL_NAME: &str = "FairPlay";
