//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod bet;

pub use bet::{
    CancelAllCommand, CancelAllHandler, CancelAllResult, GetStatusHandler, GetStatusQuery,
    SubmitBetCommand, SubmitBetHandler, SubmitBetResult,
};
