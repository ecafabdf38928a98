//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machines)
//! - `slot` - Slot identities, bet sides, and per-connection slot assignment
//! - `bet` - Two-sided bet aggregate and settlement rules
//! - `room` - Per-subject slot occupancy, listeners, and active bet

pub mod bet;
pub mod foundation;
pub mod room;
pub mod slot;
