//! HTTP adapters - REST endpoints for the operator front end.
//!
//! - `bet` - Bet submission, cancel-all and slot status
//! - `middleware` - Bearer token authentication

pub mod bet;
pub mod middleware;

pub use bet::{bet_router, BetAppState};
pub use middleware::{auth_middleware, AuthState, RequireAuth};
