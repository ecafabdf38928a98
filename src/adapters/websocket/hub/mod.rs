//! The hub: single-consumer coordinator for all rooms.
//!
//! # Architecture
//!
//! ```text
//! gateway reader ─┐
//! gateway reader ─┼─► HubEvent queue ─► Hub (one task) ─► per-connection outbound queues
//! HTTP handlers ──┤        ▲                 │
//! timers ─────────┘        └── Scheduler ◄───┘
//!                 heartbeat interval (same select! loop)
//! ```
//!
//! Every unit of work (a frame, a heartbeat tick, a timer, a front-end
//! command) runs to completion before the next starts, so room state is
//! never observed half-updated and no locks are taken.
//!
//! # Components
//!
//! - [`rooms`] - Room Manager (subject → room)
//! - `assignment` - Slot requests, registration, and release
//! - `heartbeat` - Liveness supervision
//! - `broadcaster` - Status fan-out
//! - `orchestrator` - Bet dispatch, settlement, and cancellation

mod assignment;
mod broadcaster;
mod connection;
mod heartbeat;
mod orchestrator;
pub mod rooms;

#[cfg(test)]
mod test_support;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::SessionConfig;
use crate::domain::bet::{BetTimer, DispatchError};
use crate::domain::foundation::{BetId, ConnectionId, SubjectId};
use crate::domain::room::StatusVector;
use crate::ports::{BetDispatcher, CancelScope, DualBetRequest, Scheduler, SingleBetRequest};

use super::messages::{ClientMessage, ServerMessage};
use super::scheduler::TokioScheduler;

pub use connection::{Connection, ConnectionHandle, Outbound};
pub use rooms::RoomManager;

/// Timing knobs for the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubSettings {
    pub heartbeat_interval: Duration,
    pub bet_timeout: Duration,
    pub cleanup_grace: Duration,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(10),
            bet_timeout: Duration::from_secs(10),
            cleanup_grace: Duration::from_secs(2),
        }
    }
}

impl From<&SessionConfig> for HubSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            heartbeat_interval: config.heartbeat_interval(),
            bet_timeout: config.bet_timeout(),
            cleanup_grace: config.bet_cleanup_grace(),
        }
    }
}

/// A front-end call, answered through `reply`.
#[derive(Debug)]
pub enum HubCommand {
    PlaceBoth {
        request: DualBetRequest,
        reply: oneshot::Sender<Result<BetId, DispatchError>>,
    },
    PlaceSingle {
        request: SingleBetRequest,
        reply: oneshot::Sender<Result<(), DispatchError>>,
    },
    CancelAll {
        scope: CancelScope,
        reply: oneshot::Sender<usize>,
    },
    Status {
        subject: SubjectId,
        reply: oneshot::Sender<StatusVector>,
    },
    RoomCount {
        reply: oneshot::Sender<usize>,
    },
}

/// One unit of work for the hub.
#[derive(Debug)]
pub enum HubEvent {
    /// Handshake succeeded; the hub acknowledges with `hello`.
    Authenticated {
        connection: ConnectionId,
        subject: SubjectId,
        outbound: ConnectionHandle,
    },
    Frame {
        connection: ConnectionId,
        message: ClientMessage,
    },
    /// A post-handshake text frame that did not decode.
    Malformed {
        connection: ConnectionId,
        reason: String,
    },
    Disconnected {
        connection: ConnectionId,
    },
    Timer(BetTimer),
    Command(HubCommand),
}

pub struct Hub {
    rooms: RoomManager,
    connections: HashMap<ConnectionId, Connection>,
    scheduler: Arc<dyn Scheduler>,
    settings: HubSettings,
}

impl Hub {
    pub fn new(settings: HubSettings, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            rooms: RoomManager::new(),
            connections: HashMap::new(),
            scheduler,
            settings,
        }
    }

    pub fn settings(&self) -> HubSettings {
        self.settings
    }

    pub fn rooms(&self) -> &RoomManager {
        &self.rooms
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Processes events until every sender is gone.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<HubEvent>) {
        let period = self.settings.heartbeat_interval;
        let mut heartbeat = tokio::time::interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            heartbeat_ms = period.as_millis() as u64,
            bet_timeout_ms = self.settings.bet_timeout.as_millis() as u64,
            "Hub started"
        );

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                _ = heartbeat.tick() => self.heartbeat(),
            }
        }

        tracing::info!("Hub stopped");
    }

    /// Applies one event to completion.
    pub fn handle_event(&mut self, event: HubEvent) {
        match event {
            HubEvent::Authenticated {
                connection,
                subject,
                outbound,
            } => self.attach(connection, subject, outbound),
            HubEvent::Frame {
                connection,
                message,
            } => self.handle_frame(connection, message),
            HubEvent::Malformed { connection, reason } => {
                tracing::debug!(connection_id = %connection, reason = %reason, "Malformed frame");
                self.send_to(
                    connection,
                    ServerMessage::error(format!("Invalid message format: {}", reason)),
                );
            }
            HubEvent::Disconnected { connection } => {
                self.detach(connection, "socket closed");
            }
            HubEvent::Timer(timer) => self.handle_timer(timer),
            HubEvent::Command(command) => self.handle_command(command),
        }
    }

    fn attach(&mut self, id: ConnectionId, subject: SubjectId, outbound: ConnectionHandle) {
        self.rooms.get_or_create(&subject);
        outbound.send(ServerMessage::Hello { success: true });
        tracing::info!(connection_id = %id, subject = %subject, "Connection authenticated");
        self.connections.insert(id, Connection::new(subject, outbound));
    }

    /// Forgets a connection and releases whatever it held.
    fn detach(&mut self, id: ConnectionId, reason: &str) {
        let Some(mut connection) = self.connections.remove(&id) else {
            return;
        };
        let subject = connection.subject.clone();

        let released = self.rooms.get_mut(&subject).and_then(|room| {
            room.remove_listener(&id);
            room.release(id, &mut connection.assignment)
        });

        tracing::info!(
            connection_id = %id,
            subject = %subject,
            slot = ?released.map(|r| r.slot),
            connected_ms = connection.connected_at.elapsed_millis(),
            reason,
            "Connection detached"
        );

        if released.is_some_and(|r| r.was_registered) {
            self.broadcast_status(&subject);
        }
    }

    fn handle_frame(&mut self, id: ConnectionId, message: ClientMessage) {
        if !self.connections.contains_key(&id) {
            tracing::debug!(connection_id = %id, kind = message.kind(), "Frame for unknown connection");
            return;
        }
        tracing::trace!(connection_id = %id, kind = message.kind(), "Frame received");

        match message {
            ClientMessage::Hello { .. } => {
                tracing::debug!(connection_id = %id, "Duplicate hello ignored");
            }
            ClientMessage::RegisterStatusListener => self.add_listener(id),
            ClientMessage::RequestAssignment => self.request_assignment(id),
            ClientMessage::Register { slot } => self.register(id, slot),
            ClientMessage::Pong => self.record_pong(id),
            ClientMessage::BetSuccess { slot, .. } => self.bet_success(id, slot),
            ClientMessage::BetError {
                slot,
                platform,
                amount,
                side,
                message,
            } => self.bet_error(id, slot, platform, amount, side, message),
            ClientMessage::Unknown => {
                tracing::warn!(connection_id = %id, "Unknown message type ignored");
            }
        }
    }

    fn handle_command(&mut self, command: HubCommand) {
        match command {
            HubCommand::PlaceBoth { request, reply } => {
                let _ = reply.send(self.place_both(request));
            }
            HubCommand::PlaceSingle { request, reply } => {
                let _ = reply.send(self.place_single(request));
            }
            HubCommand::CancelAll { scope, reply } => {
                let _ = reply.send(self.cancel_all(&scope));
            }
            HubCommand::Status { subject, reply } => {
                let status = self
                    .rooms
                    .get(&subject)
                    .map(|room| room.status())
                    .unwrap_or_default();
                let _ = reply.send(status);
            }
            HubCommand::RoomCount { reply } => {
                let _ = reply.send(self.rooms.len());
            }
        }
    }

    /// Returns false if the target is unknown or its writer is gone.
    fn send_to(&self, id: ConnectionId, message: ServerMessage) -> bool {
        self.connections
            .get(&id)
            .is_some_and(|connection| connection.handle.send(message))
    }
}

/// Cloneable entry point into a running hub.
#[derive(Debug, Clone)]
pub struct HubHandle {
    events: mpsc::UnboundedSender<HubEvent>,
}

impl HubHandle {
    pub fn new(events: mpsc::UnboundedSender<HubEvent>) -> Self {
        Self { events }
    }

    /// Returns false if the hub has stopped.
    pub fn send(&self, event: HubEvent) -> bool {
        self.events.send(event).is_ok()
    }

    async fn call<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> HubCommand,
    ) -> Result<T, DispatchError> {
        let (reply, response) = oneshot::channel();
        if !self.send(HubEvent::Command(build(reply))) {
            return Err(DispatchError::unavailable("hub stopped"));
        }
        response
            .await
            .map_err(|_| DispatchError::unavailable("hub dropped the request"))
    }

    /// Number of rooms the hub currently tracks.
    pub async fn room_count(&self) -> Result<usize, DispatchError> {
        self.call(|reply| HubCommand::RoomCount { reply }).await
    }
}

#[async_trait]
impl BetDispatcher for HubHandle {
    async fn place_both(&self, request: DualBetRequest) -> Result<BetId, DispatchError> {
        self.call(|reply| HubCommand::PlaceBoth { request, reply })
            .await?
    }

    async fn place_single(&self, request: SingleBetRequest) -> Result<(), DispatchError> {
        self.call(|reply| HubCommand::PlaceSingle { request, reply })
            .await?
    }

    async fn cancel_all(&self, scope: CancelScope) -> Result<usize, DispatchError> {
        self.call(|reply| HubCommand::CancelAll { scope, reply }).await
    }

    async fn status(&self, subject: SubjectId) -> Result<StatusVector, DispatchError> {
        self.call(|reply| HubCommand::Status { subject, reply }).await
    }
}

/// Starts a hub on the current runtime with tokio-backed timers.
pub fn spawn_hub(settings: HubSettings) -> (HubHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let scheduler = Arc::new(TokioScheduler::new(&tx));
    let hub = Hub::new(settings, scheduler);
    let task = tokio::spawn(hub.run(rx));
    (HubHandle::new(tx), task)
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::domain::slot::Slot;

    #[test]
    fn authenticated_connection_gets_hello_and_room() {
        let (mut hub, _scheduler) = hub();
        let alice = subject("alice");

        let (_id, mut rx) = connect(&mut hub, &alice);

        assert_eq!(drain(&mut rx), vec![ServerMessage::Hello { success: true }]);
        assert_eq!(hub.rooms().len(), 1);
        assert_eq!(hub.connection_count(), 1);
    }

    #[test]
    fn same_subject_reuses_room() {
        let (mut hub, _scheduler) = hub();
        let alice = subject("alice");

        connect(&mut hub, &alice);
        connect(&mut hub, &alice);
        connect(&mut hub, &subject("bob"));

        assert_eq!(hub.rooms().len(), 2);
    }

    #[test]
    fn malformed_frame_is_reported_and_connection_kept() {
        let (mut hub, _scheduler) = hub();
        let (id, mut rx) = connect(&mut hub, &subject("alice"));
        drain(&mut rx);

        hub.handle_event(HubEvent::Malformed {
            connection: id,
            reason: "expected value".to_string(),
        });

        assert_eq!(
            drain(&mut rx),
            vec![ServerMessage::error("Invalid message format: expected value")]
        );
        assert_eq!(hub.connection_count(), 1);
    }

    #[test]
    fn unknown_and_duplicate_hello_frames_are_ignored() {
        let (mut hub, _scheduler) = hub();
        let (id, mut rx) = connect(&mut hub, &subject("alice"));
        drain(&mut rx);

        frame(&mut hub, id, ClientMessage::Unknown);
        frame(&mut hub, id, ClientMessage::Hello { token: None });

        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn disconnect_of_registered_slot_frees_it_and_broadcasts() {
        let (mut hub, _scheduler) = hub();
        let alice = subject("alice");
        let (listener, mut listener_rx) = connect(&mut hub, &alice);
        frame(&mut hub, listener, ClientMessage::RegisterStatusListener);
        let (worker, _worker_rx) = register(&mut hub, &alice, Slot::Slot1);
        drain(&mut listener_rx);

        hub.handle_event(HubEvent::Disconnected { connection: worker });

        assert_eq!(drain(&mut listener_rx), vec![status(false, false)]);
        let (next, mut next_rx) = connect(&mut hub, &alice);
        drain(&mut next_rx);
        frame(&mut hub, next, ClientMessage::RequestAssignment);
        assert_eq!(
            drain(&mut next_rx),
            vec![ServerMessage::Assignment { slot: Slot::Slot1 }]
        );
    }

    #[test]
    fn disconnect_of_provisional_hold_frees_slot_silently() {
        let (mut hub, _scheduler) = hub();
        let alice = subject("alice");
        let (listener, mut listener_rx) = connect(&mut hub, &alice);
        frame(&mut hub, listener, ClientMessage::RegisterStatusListener);
        let (worker, _rx) = connect(&mut hub, &alice);
        frame(&mut hub, worker, ClientMessage::RequestAssignment);
        drain(&mut listener_rx);

        hub.handle_event(HubEvent::Disconnected { connection: worker });

        assert!(drain(&mut listener_rx).is_empty());
        let room = hub.rooms().get(&alice).unwrap();
        assert_eq!(room.occupied_count(), 0);
    }

    #[test]
    fn disconnect_of_unknown_connection_is_noop() {
        let (mut hub, _scheduler) = hub();
        hub.handle_event(HubEvent::Disconnected {
            connection: ConnectionId::new(),
        });
        assert_eq!(hub.connection_count(), 0);
    }

    #[tokio::test]
    async fn handle_reports_unavailable_after_hub_stops() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let handle = HubHandle::new(tx);

        let err = handle.status(subject("alice")).await.unwrap_err();
        assert!(matches!(err, DispatchError::Unavailable(_)));
    }

    #[tokio::test]
    async fn spawned_hub_answers_commands() {
        let (handle, _task) = spawn_hub(HubSettings::default());

        let status = handle.status(subject("alice")).await.unwrap();
        assert_eq!(status, StatusVector::default());

        let reached = handle.cancel_all(CancelScope::AllRooms).await.unwrap();
        assert_eq!(reached, 0);
        assert_eq!(handle.room_count().await.unwrap(), 0);
    }
}
