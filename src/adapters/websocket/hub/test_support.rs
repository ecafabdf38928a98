//! Helpers for driving a hub synchronously in tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::domain::bet::BetTimer;
use crate::domain::foundation::{ConnectionId, SubjectId};
use crate::domain::room::StatusVector;
use crate::domain::slot::Slot;
use crate::ports::Scheduler;

use super::super::messages::{ClientMessage, ServerMessage};
use super::{ConnectionHandle, Hub, HubEvent, HubSettings, Outbound};

/// Captures scheduled timers instead of running them.
#[derive(Default)]
pub struct RecordingScheduler {
    timers: Mutex<Vec<(Duration, BetTimer)>>,
}

impl RecordingScheduler {
    pub fn take(&self) -> Vec<(Duration, BetTimer)> {
        std::mem::take(&mut *self.timers.lock().unwrap())
    }
}

impl Scheduler for RecordingScheduler {
    fn schedule(&self, delay: Duration, timer: BetTimer) {
        self.timers.lock().unwrap().push((delay, timer));
    }
}

pub fn settings() -> HubSettings {
    HubSettings {
        heartbeat_interval: Duration::from_secs(10),
        bet_timeout: Duration::from_secs(10),
        cleanup_grace: Duration::from_secs(2),
    }
}

pub fn hub() -> (Hub, Arc<RecordingScheduler>) {
    let scheduler = Arc::new(RecordingScheduler::default());
    (Hub::new(settings(), scheduler.clone()), scheduler)
}

pub fn subject(name: &str) -> SubjectId {
    SubjectId::new(name).unwrap()
}

pub fn connect(hub: &mut Hub, subject: &SubjectId) -> (ConnectionId, mpsc::UnboundedReceiver<Outbound>) {
    let id = ConnectionId::new();
    let (tx, rx) = mpsc::unbounded_channel();
    hub.handle_event(HubEvent::Authenticated {
        connection: id,
        subject: subject.clone(),
        outbound: ConnectionHandle::new(id, tx),
    });
    (id, rx)
}

pub fn frame(hub: &mut Hub, id: ConnectionId, message: ClientMessage) {
    hub.handle_event(HubEvent::Frame {
        connection: id,
        message,
    });
}

/// Connects, requests, and registers; returns with the queue drained.
pub fn register(
    hub: &mut Hub,
    subject: &SubjectId,
    slot: Slot,
) -> (ConnectionId, mpsc::UnboundedReceiver<Outbound>) {
    let (id, mut rx) = connect(hub, subject);
    frame(hub, id, ClientMessage::RequestAssignment);
    frame(hub, id, ClientMessage::Register { slot });
    let received = drain(&mut rx);
    assert!(
        received.contains(&ServerMessage::Registered { slot }),
        "registration failed: {:?}",
        received
    );
    (id, rx)
}

pub fn drain_outbound(rx: &mut mpsc::UnboundedReceiver<Outbound>) -> Vec<Outbound> {
    let mut items = Vec::new();
    while let Ok(item) = rx.try_recv() {
        items.push(item);
    }
    items
}

/// Queued messages, ignoring close requests.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Outbound>) -> Vec<ServerMessage> {
    drain_outbound(rx)
        .into_iter()
        .filter_map(|item| match item {
            Outbound::Message(message) => Some(message),
            Outbound::Close => None,
        })
        .collect()
}

pub fn status(slot1: bool, slot2: bool) -> ServerMessage {
    ServerMessage::Status {
        connected: StatusVector { slot1, slot2 },
    }
}
