//! Bet-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::slot::Slot;

/// A command could not be issued to its target slot(s).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Target slot(s) had no registered, open connection at dispatch time.
    #[error("{}", unreachable_message(.0))]
    Unreachable(Vec<Slot>),

    /// The coordinator is not running.
    #[error("Dispatcher unavailable: {0}")]
    Unavailable(String),
}

fn unreachable_message(slots: &[Slot]) -> String {
    match slots {
        [single] => format!("{} is not connected", single),
        many => {
            let names: Vec<&str> = many.iter().map(|s| s.as_str()).collect();
            format!("{} are not connected", names.join(" and "))
        }
    }
}

impl DispatchError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        DispatchError::Unavailable(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DispatchError::Unreachable(_) => ErrorCode::SlotUnreachable,
            DispatchError::Unavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

/// Errors surfaced to callers of the bet commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BetError {
    /// Caller-supplied values were rejected before any dispatch.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl BetError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BetError::Validation(_) => ErrorCode::ValidationFailed,
            BetError::Dispatch(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_single_slot_names_it() {
        let err = DispatchError::Unreachable(vec![Slot::Slot2]);
        assert_eq!(err.to_string(), "Slot2 is not connected");
    }

    #[test]
    fn unreachable_both_slots_names_both() {
        let err = DispatchError::Unreachable(vec![Slot::Slot1, Slot::Slot2]);
        assert_eq!(err.to_string(), "Slot1 and Slot2 are not connected");
    }

    #[test]
    fn bet_error_codes_follow_cause() {
        let validation: BetError = ValidationError::not_positive("amount").into();
        assert_eq!(validation.code(), ErrorCode::ValidationFailed);

        let dispatch: BetError = DispatchError::Unreachable(vec![Slot::Slot1]).into();
        assert_eq!(dispatch.code(), ErrorCode::SlotUnreachable);
    }
}
