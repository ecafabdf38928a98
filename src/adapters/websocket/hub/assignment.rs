//! Slot requests and registration.
//!
//! ```text
//! Idle ──requestAssignment──► Requested ──register(slot)──► Registered
//!   ▲                             │                             │
//!   └──────────── close / evict (slot released) ◄───────────────┘
//! ```

use crate::domain::foundation::ConnectionId;
use crate::domain::slot::Slot;

use super::super::messages::ServerMessage;
use super::Hub;

impl Hub {
    pub(super) fn request_assignment(&mut self, id: ConnectionId) {
        let Some(connection) = self.connections.get_mut(&id) else {
            return;
        };
        let room = self.rooms.get_or_create(&connection.subject);

        match room.request_assignment(id, &mut connection.assignment) {
            Ok(slot) => {
                tracing::info!(connection_id = %id, subject = %connection.subject, slot = %slot, "Slot assigned");
                connection.handle.send(ServerMessage::Assignment { slot });
            }
            Err(err) if err.is_fatal() => {
                tracing::warn!(connection_id = %id, subject = %connection.subject, "Assignment refused: {}", err);
                connection.handle.send(ServerMessage::error(err.to_string()));
                connection.handle.close();
            }
            Err(err) => {
                tracing::debug!(connection_id = %id, "Assignment rejected: {}", err);
                connection.handle.send(ServerMessage::error(err.to_string()));
            }
        }
    }

    pub(super) fn register(&mut self, id: ConnectionId, slot: Slot) {
        let Some(connection) = self.connections.get_mut(&id) else {
            return;
        };
        let room = self.rooms.get_or_create(&connection.subject);

        if let Err(err) = room.register(id, &mut connection.assignment, slot) {
            tracing::debug!(connection_id = %id, slot = %slot, "Registration rejected: {}", err);
            connection.handle.send(ServerMessage::error(err.to_string()));
            return;
        }

        connection.is_alive = true;
        connection.handle.send(ServerMessage::Registered { slot });
        tracing::info!(connection_id = %id, subject = %connection.subject, slot = %slot, "Slot registered");

        let subject = connection.subject.clone();
        self.broadcast_status(&subject);
    }
}
