//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the slot pairing domain.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::AuthError;
pub use errors::{ErrorCode, ValidationError};
pub use ids::{BetId, ConnectionId, SubjectId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
