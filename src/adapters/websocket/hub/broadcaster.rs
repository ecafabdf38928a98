//! Status fan-out.

use crate::domain::foundation::{ConnectionId, SubjectId};

use super::super::messages::ServerMessage;
use super::Hub;

impl Hub {
    /// Subscribes a connection to status updates and broadcasts at once.
    pub(super) fn add_listener(&mut self, id: ConnectionId) {
        let Some(subject) = self.connections.get(&id).map(|c| c.subject.clone()) else {
            return;
        };
        if self.rooms.get_or_create(&subject).add_listener(id) {
            tracing::info!(connection_id = %id, subject = %subject, "Status listener registered");
        }
        self.broadcast_status(&subject);
    }

    /// Sends the room's status to every listener and registered connection.
    pub(super) fn broadcast_status(&self, subject: &SubjectId) {
        let Some(room) = self.rooms.get(subject) else {
            return;
        };
        let connected = room.status();
        tracing::debug!(subject = %subject, ?connected, "Broadcasting status");

        for id in room.status_recipients() {
            self.send_to(id, ServerMessage::Status { connected });
        }
    }

    /// Sends `message` to every status listener of the room.
    pub(super) fn notify_listeners(&self, subject: &SubjectId, message: &ServerMessage) -> usize {
        let Some(room) = self.rooms.get(subject) else {
            return 0;
        };
        room.listeners()
            .filter(|id| self.send_to(*id, message.clone()))
            .count()
    }
}
