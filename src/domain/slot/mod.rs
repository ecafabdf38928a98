//! Slot module - fixed slot identities, bet sides, and the per-connection
//! assignment state machine.

mod assignment;
mod values;

pub use assignment::{AssignmentError, ReleasedSlot, SlotAssignment, SlotState};
pub use values::{Side, Slot};
