//! # fairplay-store
//!
//! **Match Store**: one fixed 192-byte record per match, addressed by a
//! deterministic storage name, plus the match counter that issues ids.
//!
//! ## Architecture
//!
//! 1. **MatchCounter**: the only state shared across matches; issues ids 1, 2, 3, ...
//! 2. **MatchStore**: allocate / get / bounds-checked field read and replace
//!
//! Reads and writes are restricted to the slots of the record's field
//! table. Multi-field mutations go through [`MatchStore::apply`], which
//! validates every write before touching any byte.

pub mod counter;
pub mod store;

pub use counter::MatchCounter;
pub use store::{MatchStore, RecordHandle};
