//! Match lifecycle state.
//!
//! ```text
//!   ┌─────────┐ commit  ┌───────────┐ reveal  ┌──────────┐ resolve ┌──────────┐
//!   │ CREATED ├────────▶│ COMMITTED ├────────▶│ REVEALED ├────────▶│ RESOLVED │
//!   └─────────┘         └───────────┘         └──────────┘         └──────────┘
//!       (0)                  (2)                  (3)                  (4)
//! ```
//!
//! Value 1 is reserved: `join` fills the second seat without changing state.
//! The operations set their target state unconditionally, so the forward
//! order above is the intended path, not an enforced one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{FairplayError, Result};

/// The lifecycle phase stored in a record's `state` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum MatchState {
    /// Lobby open; commitments may be published.
    Created,
    /// At least one commitment has been published.
    Committed,
    /// At least one move has been revealed and verified.
    Revealed,
    /// Terminal marker.
    Resolved,
}

impl MatchState {
    /// The value persisted in the `state` slot.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        match self {
            Self::Created => 0,
            Self::Committed => 2,
            Self::Revealed => 3,
            Self::Resolved => 4,
        }
    }

    /// Decode a persisted `state` value.
    ///
    /// # Errors
    /// Returns `InvalidState` for 1 (reserved) and anything above 4.
    pub fn from_u64(value: u64) -> Result<Self> {
        match value {
            0 => Ok(Self::Created),
            2 => Ok(Self::Committed),
            3 => Ok(Self::Revealed),
            4 => Ok(Self::Resolved),
            other => Err(FairplayError::InvalidState(other)),
        }
    }

    /// Would moving to `target` keep the state monotonic?
    #[must_use]
    pub fn is_forward(self, target: Self) -> bool {
        target >= self
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Resolved
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "CREATED"),
            Self::Committed => write!(f, "COMMITTED"),
            Self::Revealed => write!(f, "REVEALED"),
            Self::Resolved => write!(f, "RESOLVED"),
        }
    }
}
