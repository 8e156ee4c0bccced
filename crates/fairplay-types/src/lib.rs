//! # fairplay-types
//!
//! Shared types, errors, and configuration for the **FairPlay** match protocol.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`MatchId`], [`RecordKey`], [`CommitmentHash`]
//! - **Lifecycle**: [`MatchState`]
//! - **Record model**: [`MatchRecord`], [`Field`], [`Seat`], [`MoveValue`], [`FieldWrite`]
//! - **Commitments**: [`compute_commitment`], [`verify_commitment`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`FairplayError`] with `FP_ERR_` prefix codes
//! - **Constants**: record geometry and operation names

pub mod commitment;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod record;
pub mod state;

// Re-export all primary types at crate root for ergonomic imports:
//   use fairplay_types::{MatchRecord, MatchState, Address, ...};

pub use commitment::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use record::*;
pub use state::*;

// Constants are accessed via `fairplay_types::constants::FOO`
// (not re-exported to avoid name collisions).
