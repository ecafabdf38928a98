//! LegState - lifecycle of one side of a two-sided bet.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Settlement state of one leg.
///
/// Every leg leaves `Pending` exactly once; all other states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LegState {
    #[default]
    Pending,
    Success,
    Error,
    Timeout,
    Cancelled,
}

impl LegState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LegState::Pending)
    }

    /// True for the states that trigger cross-cancellation of the partner.
    pub fn is_failure(&self) -> bool {
        matches!(self, LegState::Error | LegState::Timeout)
    }
}

impl StateMachine for LegState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(self, LegState::Pending) && !matches!(target, LegState::Pending)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            LegState::Pending => vec![
                LegState::Success,
                LegState::Error,
                LegState::Timeout,
                LegState::Cancelled,
            ],
            _ => vec![],
        }
    }
}

impl fmt::Display for LegState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LegState::Pending => "pending",
            LegState::Success => "success",
            LegState::Error => "error",
            LegState::Timeout => "timeout",
            LegState::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}
