//! Per-connection slot assignment lifecycle.
//!
//! A connection first *requests* a slot, which places a provisional hold,
//! and later *registers* it, which finalizes the hold. Closing the
//! connection releases whatever it held, in either state.
//!
//! ```text
//! Idle ──request──▶ Requested ──register──▶ Registered
//!   ▲                   │                       │
//!   └──────release──────┴────────release────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Slot;
use crate::domain::foundation::StateMachine;

/// Where a connection is in the assignment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    #[default]
    Idle,
    Requested,
    Registered,
}

impl StateMachine for SlotState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SlotState::*;
        matches!(
            (self, target),
            (Idle, Requested) | (Requested, Registered) | (Requested, Idle) | (Registered, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SlotState::*;
        match self {
            Idle => vec![Requested],
            Requested => vec![Registered, Idle],
            Registered => vec![Idle],
        }
    }
}

/// Per-connection assignment rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("Connection already holds {0}")]
    AlreadyAssigned(Slot),

    #[error("Register requires a prior assignment")]
    NotRequested,

    #[error("Cannot register {requested}: assignment was {held}")]
    SlotMismatch { requested: Slot, held: Slot },
}

/// A slot given up by a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleasedSlot {
    pub slot: Slot,
    /// True if the hold had been finalized. Only then does connectivity change.
    pub was_registered: bool,
}

/// The assignment half of a connection's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotAssignment {
    state: SlotState,
    slot: Option<Slot>,
}

impl SlotAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    /// The held or registered slot, if any.
    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    pub fn is_registered(&self) -> bool {
        self.state == SlotState::Registered
    }

    /// Fails unless the connection is Idle.
    pub fn ensure_idle(&self) -> Result<(), AssignmentError> {
        match (self.state, self.slot) {
            (SlotState::Idle, _) => Ok(()),
            (_, Some(slot)) => Err(AssignmentError::AlreadyAssigned(slot)),
            (_, None) => Err(AssignmentError::NotRequested),
        }
    }

    /// Idle → Requested, recording the provisional hold.
    pub fn hold(&mut self, slot: Slot) -> Result<(), AssignmentError> {
        self.ensure_idle()?;
        self.state = SlotState::Requested;
        self.slot = Some(slot);
        Ok(())
    }

    /// Checks that `requested` may finalize this connection's hold.
    pub fn check_confirm(&self, requested: Slot) -> Result<(), AssignmentError> {
        match (self.state, self.slot) {
            (SlotState::Requested, Some(held)) if held == requested => Ok(()),
            (SlotState::Requested, Some(held)) => {
                Err(AssignmentError::SlotMismatch { requested, held })
            }
            (SlotState::Registered, Some(held)) => Err(AssignmentError::AlreadyAssigned(held)),
            _ => Err(AssignmentError::NotRequested),
        }
    }

    /// Requested → Registered.
    pub fn confirm(&mut self, requested: Slot) -> Result<(), AssignmentError> {
        self.check_confirm(requested)?;
        self.state = SlotState::Registered;
        Ok(())
    }

    /// Any state → Idle, returning what was held.
    pub fn release(&mut self) -> Option<ReleasedSlot> {
        let was_registered = self.is_registered();
        self.state = SlotState::Idle;
        self.slot.take().map(|slot| ReleasedSlot {
            slot,
            was_registered,
        })
    }
}
