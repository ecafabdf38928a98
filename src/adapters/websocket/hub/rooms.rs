//! Room registry keyed by subject.
//!
//! # Architecture
//!
//! ```text
//! Room: alice          Room: bob
//! ├── Slot1: conn-a    ├── Slot1: conn-d
//! ├── Slot2: conn-b    └── listeners: conn-e
//! └── listeners: conn-c
//! ```
//!
//! Rooms are created on a subject's first authenticated handshake and live
//! for the rest of the process. Only the hub task touches the registry, so
//! no locking is involved.

use std::collections::HashMap;

use crate::domain::foundation::SubjectId;
use crate::domain::room::Room;

#[derive(Debug, Default)]
pub struct RoomManager {
    rooms: HashMap<SubjectId, Room>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the subject's room, creating it on first use.
    pub fn get_or_create(&mut self, subject: &SubjectId) -> &mut Room {
        self.rooms.entry(subject.clone()).or_insert_with(|| {
            tracing::info!(subject = %subject, "Room created");
            Room::new(subject.clone())
        })
    }

    pub fn get(&self, subject: &SubjectId) -> Option<&Room> {
        self.rooms.get(subject)
    }

    pub fn get_mut(&mut self, subject: &SubjectId) -> Option<&mut Room> {
        self.rooms.get_mut(subject)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
