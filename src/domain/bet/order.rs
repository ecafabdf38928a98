//! Command payloads sent to slot workers.

use serde::Serialize;

use crate::domain::slot::Side;

/// A concrete instruction for one worker: place `amount` on `side`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BetOrder {
    pub platform: String,
    pub amount: u64,
    pub side: Side,
}

/// Instruction to withdraw a bet.
///
/// Fields are empty when the cancellation is not tied to a known order
/// (administrative cancel-all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelOrder {
    pub platform: String,
    pub amount: Option<u64>,
    pub side: Option<Side>,
}

impl CancelOrder {
    /// Cancellation that names no particular order.
    pub fn blanket() -> Self {
        Self {
            platform: String::new(),
            amount: None,
            side: None,
        }
    }
}

impl From<&BetOrder> for CancelOrder {
    fn from(order: &BetOrder) -> Self {
        Self {
            platform: order.platform.clone(),
            amount: Some(order.amount),
            side: Some(order.side),
        }
    }
}
