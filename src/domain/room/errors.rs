//! Room-specific error types.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::domain::slot::{AssignmentError, Slot};

/// Slot occupancy rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// Both slots are held. The requesting connection is closed.
    #[error("Both slots are occupied")]
    SlotsFull,

    /// The slot is finalized by a different connection.
    #[error("{0} is already registered by another connection")]
    SlotTaken(Slot),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),
}

impl RoomError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RoomError::SlotsFull => ErrorCode::SlotsFull,
            RoomError::SlotTaken(_) | RoomError::Assignment(_) => ErrorCode::SlotConflict,
        }
    }

    /// Capacity errors end the connection; the rest are answered in place.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RoomError::SlotsFull)
    }
}
