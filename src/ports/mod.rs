//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TokenVerifier` - Resolves a credential to a subject
//! - `Scheduler` - Delivers bet timers back to the coordinator
//! - `BetDispatcher` - Front-end command inlet (dispatch, cancel, status)

mod bet_dispatcher;
mod scheduler;
mod token_verifier;

pub use bet_dispatcher::{BetDispatcher, CancelScope, DualBetRequest, SingleBetRequest};
pub use scheduler::Scheduler;
pub use token_verifier::TokenVerifier;
