//! Bet command handlers.

mod cancel_all;
mod get_status;
mod submit_bet;

pub use cancel_all::{CancelAllCommand, CancelAllHandler, CancelAllResult};
pub use get_status::{GetStatusHandler, GetStatusQuery};
pub use submit_bet::{SubmitBetCommand, SubmitBetHandler, SubmitBetResult};
