//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer validates front-end input and hands it to the coordinator
//! through the `BetDispatcher` port.

pub mod handlers;

pub use handlers::{
    CancelAllCommand, CancelAllHandler, CancelAllResult, GetStatusHandler, GetStatusQuery,
    SubmitBetCommand, SubmitBetHandler, SubmitBetResult,
};
