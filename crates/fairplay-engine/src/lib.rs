//! # fairplay-engine
//!
//! **Match Protocol Engine**: the lifecycle state machine and commit-reveal
//! fairness protocol for two-party wagered matches.
//!
//! ## Architecture
//!
//! 1. **MatchEngine**: validates and applies create / join / commit / reveal / resolve
//! 2. **Dispatch**: decodes positional call arguments into an [`Operation`]
//! 3. **MatchView**: decoded, display-friendly snapshot of a record
//!
//! ## Call Flow
//!
//! ```text
//! Call → Operation::parse() → MatchStore.get() → validate preconditions
//!      → MatchStore.apply(field writes) → Outcome
//! ```
//!
//! Every operation validates completely before its single atomic write;
//! a failed call leaves the record byte-for-byte unchanged.

pub mod dispatch;
pub mod engine;
pub mod view;

pub use dispatch::{Call, Operation, Outcome};
pub use engine::MatchEngine;
pub use view::MatchView;
