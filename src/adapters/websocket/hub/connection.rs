//! Per-connection state held by the hub.

use tokio::sync::mpsc;

use crate::domain::foundation::{ConnectionId, SubjectId, Timestamp};
use crate::domain::slot::SlotAssignment;

use super::super::messages::ServerMessage;

/// Work item for a connection's writer task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Message(ServerMessage),
    /// Flush what is queued, then close the socket.
    Close,
}

/// Sending half of a connection's outbound queue.
///
/// Sends to a connection whose writer is gone are dropped silently.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, tx: mpsc::UnboundedSender<Outbound>) -> Self {
        Self { id, tx }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Returns false if the writer is gone.
    pub fn send(&self, message: ServerMessage) -> bool {
        self.tx.send(Outbound::Message(message)).is_ok()
    }

    pub fn close(&self) {
        let _ = self.tx.send(Outbound::Close);
    }

    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// An authenticated connection.
#[derive(Debug)]
pub struct Connection {
    pub subject: SubjectId,
    pub assignment: SlotAssignment,
    /// Cleared on each heartbeat ping, set again by `pong`.
    pub is_alive: bool,
    pub handle: ConnectionHandle,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(subject: SubjectId, handle: ConnectionHandle) -> Self {
        Self {
            subject,
            assignment: SlotAssignment::new(),
            is_alive: true,
            handle,
            connected_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.handle.id()
    }
}
