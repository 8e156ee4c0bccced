//! Error types for the FairPlay match protocol.
//!
//! All errors use the `FP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Dispatch errors (malformed calls)
//! - 2xx: Store / record codec errors
//! - 3xx: Protocol errors (lifecycle and commitment invariants)
//! - 9xx: General / internal errors
//!
//! Every error is categorical and non-retryable: it reports a violated
//! invariant, never a transient fault. An operation that returns one of
//! these has left its record untouched.

use thiserror::Error;

use crate::MatchId;

/// Central error enum for all FairPlay operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FairplayError {
    // =================================================================
    // Dispatch Errors (1xx)
    // =================================================================
    /// Wrong number of positional arguments for an operation.
    #[error("FP_ERR_100: Arity error: {operation} expects {expected} arguments, got {got}")]
    ArityError {
        operation: String,
        expected: usize,
        got: usize,
    },

    /// The call named an operation this module does not implement.
    #[error("FP_ERR_101: Unknown operation: {0}")]
    UnknownOperation(String),

    /// A positional argument could not be decoded.
    #[error("FP_ERR_102: Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // =================================================================
    // Store / Codec Errors (2xx)
    // =================================================================
    /// No record has been allocated for this match.
    #[error("FP_ERR_200: Match record not found: {0}")]
    NotFound(MatchId),

    /// A record is already allocated for this match.
    #[error("FP_ERR_201: Match record already exists: {0}")]
    AlreadyExists(MatchId),

    /// A byte range extends past the end of the record.
    #[error("FP_ERR_202: Range out of record bounds: offset {offset}, width {width}")]
    OutOfRange { offset: usize, width: usize },

    /// Supplied bytes do not fit the destination slot exactly.
    #[error("FP_ERR_203: Length mismatch: slot is {expected} bytes, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// The `state` slot holds a value outside the lifecycle enum.
    #[error("FP_ERR_204: Invalid lifecycle state value: {0}")]
    InvalidState(u64),

    // =================================================================
    // Protocol Errors (3xx)
    // =================================================================
    /// The second seat of this match is already taken.
    #[error("FP_ERR_300: Match already joined: {0}")]
    AlreadyJoined(MatchId),

    /// The creator tried to join their own match.
    #[error("FP_ERR_301: Self-join rejected: caller already holds player1 in {0}")]
    SelfJoin(MatchId),

    /// `digest(move || nonce)` does not equal the caller's stored commitment.
    #[error("FP_ERR_302: Commitment mismatch on reveal in {0}")]
    CommitmentMismatch(MatchId),

    /// The caller holds neither seat of this match.
    #[error("FP_ERR_303: Caller is not a participant of {0}")]
    NotParticipant(MatchId),

    /// The all-zero sentinel address cannot act as a caller.
    #[error("FP_ERR_304: Zero address cannot be a caller")]
    ZeroAddressCaller,

    /// The match is resolved and the engine is configured to reject re-entry.
    #[error("FP_ERR_305: Match is resolved and closed: {0}")]
    MatchClosed(MatchId),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// The match counter cannot issue another identifier.
    #[error("FP_ERR_900: Match counter exhausted")]
    CounterExhausted,

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("FP_ERR_901: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("FP_ERR_902: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, FairplayError>;

impl From<serde_json::Error> for FairplayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
