//! Room module - per-subject namespace of slot occupancy, status listeners,
//! and the active bet.

mod aggregate;
mod errors;
mod status;

pub use aggregate::Room;
pub use errors::RoomError;
pub use status::StatusVector;
