//! Bet module - two-sided command transactions and their settlement rules.

mod aggregate;
mod errors;
mod leg;
mod order;
mod timer;

pub use aggregate::{Bet, ErrorSettlement, Leg, TimeoutSettlement};
pub use errors::{BetError, DispatchError};
pub use leg::LegState;
pub use order::{BetOrder, CancelOrder};
pub use timer::BetTimer;
