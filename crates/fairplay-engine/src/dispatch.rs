//! Operation dispatch — decodes positional call arguments.
//!
//! A call carries the authenticated sender plus positional arguments.
//! `args[0]` names the operation; the rest are raw bytes:
//!
//! | operation | args                                   | count |
//! |-----------|----------------------------------------|-------|
//! | create    | name, be_u64(wager)                    | 2     |
//! | join      | name, be_u64(match_id)                 | 2     |
//! | commit    | name, be_u64(match_id), digest[32]     | 3     |
//! | reveal    | name, be_u64(match_id), move, nonce    | 4     |
//! | resolve   | name, be_u64(match_id)                 | 2     |
//!
//! Arity is checked before any argument is decoded or any record touched.

use fairplay_types::{
    Address, CommitmentHash, FairplayError, MatchId, Result,
    constants::{OP_COMMIT, OP_CREATE, OP_JOIN, OP_RESOLVE, OP_REVEAL, U64_WIDTH},
};

use crate::MatchEngine;

/// A decoded protocol operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Create {
        wager: u64,
    },
    Join {
        match_id: MatchId,
    },
    Commit {
        match_id: MatchId,
        commitment: CommitmentHash,
    },
    Reveal {
        match_id: MatchId,
        move_bytes: Vec<u8>,
        nonce: Vec<u8>,
    },
    Resolve {
        match_id: MatchId,
    },
}

impl Operation {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => OP_CREATE,
            Self::Join { .. } => OP_JOIN,
            Self::Commit { .. } => OP_COMMIT,
            Self::Reveal { .. } => OP_REVEAL,
            Self::Resolve { .. } => OP_RESOLVE,
        }
    }

    /// Total argument count (including the name) for an operation name.
    #[must_use]
    pub fn arity(name: &str) -> Option<usize> {
        match name {
            OP_CREATE | OP_JOIN | OP_RESOLVE => Some(2),
            OP_COMMIT => Some(3),
            OP_REVEAL => Some(4),
            _ => None,
        }
    }

    /// Decode positional arguments.
    ///
    /// # Errors
    /// - `ArityError` for an empty call or the wrong argument count
    /// - `UnknownOperation` for an unrecognized name
    /// - `InvalidArgument` if an integer is not 8 bytes
    /// - `LengthMismatch` if a commitment is not 32 bytes
    pub fn parse(args: &[Vec<u8>]) -> Result<Self> {
        let raw_name = args.first().ok_or_else(|| FairplayError::ArityError {
            operation: "<none>".into(),
            expected: 1,
            got: 0,
        })?;
        let name = String::from_utf8_lossy(raw_name);
        let expected =
            Self::arity(&name).ok_or_else(|| FairplayError::UnknownOperation(name.to_string()))?;
        if args.len() != expected {
            return Err(FairplayError::ArityError {
                operation: name.to_string(),
                expected,
                got: args.len(),
            });
        }

        let op = match &*name {
            OP_CREATE => Self::Create {
                wager: decode_u64(&args[1], "wager")?,
            },
            OP_JOIN => Self::Join {
                match_id: decode_match_id(&args[1])?,
            },
            OP_COMMIT => Self::Commit {
                match_id: decode_match_id(&args[1])?,
                commitment: CommitmentHash::from_slice(&args[2])?,
            },
            OP_REVEAL => Self::Reveal {
                match_id: decode_match_id(&args[1])?,
                move_bytes: args[2].clone(),
                nonce: args[3].clone(),
            },
            _ => Self::Resolve {
                match_id: decode_match_id(&args[1])?,
            },
        };
        Ok(op)
    }

    /// Encode back into positional arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<Vec<u8>> {
        let name = self.name().as_bytes().to_vec();
        match self {
            Self::Create { wager } => vec![name, wager.to_be_bytes().to_vec()],
            Self::Join { match_id } | Self::Resolve { match_id } => {
                vec![name, match_id.to_be_bytes().to_vec()]
            }
            Self::Commit {
                match_id,
                commitment,
            } => vec![
                name,
                match_id.to_be_bytes().to_vec(),
                commitment.as_bytes().to_vec(),
            ],
            Self::Reveal {
                match_id,
                move_bytes,
                nonce,
            } => vec![
                name,
                match_id.to_be_bytes().to_vec(),
                move_bytes.clone(),
                nonce.clone(),
            ],
        }
    }
}

fn decode_u64(arg: &[u8], what: &str) -> Result<u64> {
    let bytes: [u8; U64_WIDTH] = arg
        .try_into()
        .map_err(|_| FairplayError::InvalidArgument {
            reason: format!("{what} must be {U64_WIDTH} big-endian bytes, got {}", arg.len()),
        })?;
    Ok(u64::from_be_bytes(bytes))
}

fn decode_match_id(arg: &[u8]) -> Result<MatchId> {
    decode_u64(arg, "match id").map(MatchId)
}

// ---------------------------------------------------------------------------
// Call
// ---------------------------------------------------------------------------

/// An inbound call: authenticated sender plus positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub sender: Address,
    pub args: Vec<Vec<u8>>,
}

impl Call {
    #[must_use]
    pub fn new(sender: Address, args: Vec<Vec<u8>>) -> Self {
        Self { sender, args }
    }

    #[must_use]
    pub fn from_operation(sender: Address, op: &Operation) -> Self {
        Self::new(sender, op.to_args())
    }

    #[must_use]
    pub fn create(sender: Address, wager: u64) -> Self {
        Self::from_operation(sender, &Operation::Create { wager })
    }

    #[must_use]
    pub fn join(sender: Address, match_id: MatchId) -> Self {
        Self::from_operation(sender, &Operation::Join { match_id })
    }

    #[must_use]
    pub fn commit(sender: Address, match_id: MatchId, commitment: CommitmentHash) -> Self {
        Self::from_operation(
            sender,
            &Operation::Commit {
                match_id,
                commitment,
            },
        )
    }

    #[must_use]
    pub fn reveal(sender: Address, match_id: MatchId, move_bytes: &[u8], nonce: &[u8]) -> Self {
        Self::from_operation(
            sender,
            &Operation::Reveal {
                match_id,
                move_bytes: move_bytes.to_vec(),
                nonce: nonce.to_vec(),
            },
        )
    }

    #[must_use]
    pub fn resolve(sender: Address, match_id: MatchId) -> Self {
        Self::from_operation(sender, &Operation::Resolve { match_id })
    }
}

/// What a successful call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created(MatchId),
    Joined(MatchId),
    Committed(MatchId),
    Revealed(MatchId),
    Resolved(MatchId),
}

impl Outcome {
    #[must_use]
    pub fn match_id(&self) -> MatchId {
        match *self {
            Self::Created(id)
            | Self::Joined(id)
            | Self::Committed(id)
            | Self::Revealed(id)
            | Self::Resolved(id) => id,
        }
    }
}

impl MatchEngine {
    /// Decode and apply one call.
    pub fn dispatch(&mut self, call: &Call) -> Result<Outcome> {
        let op = Operation::parse(&call.args)?;
        tracing::trace!(operation = op.name(), sender = %call.sender, "Dispatching call");

        match op {
            Operation::Create { wager } => self.create(call.sender, wager).map(Outcome::Created),
            Operation::Join { match_id } => {
                self.join(match_id, call.sender)?;
                Ok(Outcome::Joined(match_id))
            }
            Operation::Commit {
                match_id,
                commitment,
            } => {
                self.commit(match_id, call.sender, commitment)?;
                Ok(Outcome::Committed(match_id))
            }
            Operation::Reveal {
                match_id,
                move_bytes,
                nonce,
            } => {
                self.reveal(match_id, call.sender, &move_bytes, &nonce)?;
                Ok(Outcome::Revealed(match_id))
            }
            Operation::Resolve { match_id } => {
                self.resolve(match_id)?;
                Ok(Outcome::Resolved(match_id))
            }
        }
    }
}
