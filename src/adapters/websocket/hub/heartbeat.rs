//! Liveness supervision.
//!
//! Each tick, a registered connection that did not answer the previous
//! ping is evicted; every other registered connection is marked not-alive
//! and pinged again. An unresponsive peer is gone within two ticks.

use crate::domain::foundation::ConnectionId;

use super::super::messages::ServerMessage;
use super::Hub;

impl Hub {
    pub(super) fn heartbeat(&mut self) {
        let mut evicted: Vec<ConnectionId> = Vec::new();
        let mut pinged = 0usize;

        for (id, connection) in self.connections.iter_mut() {
            if !connection.assignment.is_registered() {
                continue;
            }
            if !connection.is_alive {
                evicted.push(*id);
                continue;
            }
            connection.is_alive = false;
            connection.handle.send(ServerMessage::Ping);
            pinged += 1;
        }

        tracing::trace!(pinged, evicted = evicted.len(), "Heartbeat tick");

        for id in evicted {
            if let Some(connection) = self.connections.get(&id) {
                tracing::warn!(
                    connection_id = %id,
                    subject = %connection.subject,
                    slot = ?connection.assignment.slot(),
                    "Evicting unresponsive connection"
                );
                connection.handle.close();
            }
            self.detach(id, "heartbeat timeout");
        }
    }

    pub(super) fn record_pong(&mut self, id: ConnectionId) {
        if let Some(connection) = self.connections.get_mut(&id) {
            connection.is_alive = true;
        }
    }
}
