//! Match counter — issues monotonically increasing match ids.

use fairplay_types::{FairplayError, MatchId, Result};

/// Issues match identifiers. Starts at zero on module initialization;
/// the first issued id is 1 and ids are never reused.
#[derive(Debug)]
pub struct MatchCounter {
    /// The most recently issued id (`MatchId(0)` before the first create).
    last: MatchId,
}

impl Default for MatchCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchCounter {
    #[must_use]
    pub fn new() -> Self {
        Self { last: MatchId(0) }
    }

    /// Increment and return the new id.
    ///
    /// # Errors
    /// Returns `CounterExhausted` once `u64::MAX` has been issued.
    pub fn issue(&mut self) -> Result<MatchId> {
        let id = self.last.next().ok_or(FairplayError::CounterExhausted)?;
        self.last = id;
        Ok(id)
    }

    /// The most recently issued id.
    #[must_use]
    pub fn current(&self) -> MatchId {
        self.last
    }

    /// The id the next `issue` call will return, if any.
    #[must_use]
    pub fn peek_next(&self) -> Option<MatchId> {
        self.last.next()
    }
}
