//! Room aggregate - one subject's namespace of slots, listeners and bet.
//!
//! # Occupancy
//!
//! ```text
//! holds:      [Slot1: conn-a, Slot2: conn-b]   provisional or final
//! registered: [Slot1: conn-a, Slot2: -     ]   final only
//! ```
//!
//! A slot is *held* from `requestAssignment` onward so that a second
//! connection cannot grab it before the first one registers. Only
//! registered connections count toward connectivity and receive commands.

use std::collections::HashSet;

use crate::domain::bet::Bet;
use crate::domain::foundation::{BetId, ConnectionId, SubjectId, Timestamp};
use crate::domain::slot::{ReleasedSlot, Slot, SlotAssignment};

use super::{RoomError, StatusVector};

#[derive(Debug, Clone)]
pub struct Room {
    subject: SubjectId,
    holds: [Option<ConnectionId>; 2],
    registered: [Option<ConnectionId>; 2],
    listeners: HashSet<ConnectionId>,
    active_bet: Option<Bet>,
    created_at: Timestamp,
}

impl Room {
    pub fn new(subject: SubjectId) -> Self {
        Self {
            subject,
            holds: [None; 2],
            registered: [None; 2],
            listeners: HashSet::new(),
            active_bet: None,
            created_at: Timestamp::now(),
        }
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    // ════════════════════════════════════════════════════════════════════
    // Slot occupancy
    // ════════════════════════════════════════════════════════════════════

    /// Holds the first free slot in priority order for `connection`.
    ///
    /// Nothing changes on error.
    pub fn request_assignment(
        &mut self,
        connection: ConnectionId,
        assignment: &mut SlotAssignment,
    ) -> Result<Slot, RoomError> {
        assignment.ensure_idle()?;

        let slot = Slot::ALL
            .into_iter()
            .find(|slot| self.holds[slot.index()].is_none())
            .ok_or(RoomError::SlotsFull)?;

        assignment.hold(slot)?;
        self.holds[slot.index()] = Some(connection);
        Ok(slot)
    }

    /// Finalizes `connection`'s hold on `slot`.
    pub fn register(
        &mut self,
        connection: ConnectionId,
        assignment: &mut SlotAssignment,
        slot: Slot,
    ) -> Result<(), RoomError> {
        if let Some(owner) = self.registered[slot.index()] {
            if owner != connection {
                return Err(RoomError::SlotTaken(slot));
            }
        }
        assignment.check_confirm(slot)?;
        if self.holds[slot.index()] != Some(connection) {
            return Err(RoomError::SlotTaken(slot));
        }

        assignment.confirm(slot)?;
        self.registered[slot.index()] = Some(connection);
        Ok(())
    }

    /// Releases whatever `connection` held, in any assignment state.
    pub fn release(
        &mut self,
        connection: ConnectionId,
        assignment: &mut SlotAssignment,
    ) -> Option<ReleasedSlot> {
        let released = assignment.release()?;
        let index = released.slot.index();
        if self.holds[index] == Some(connection) {
            self.holds[index] = None;
        }
        if self.registered[index] == Some(connection) {
            self.registered[index] = None;
        }
        Some(released)
    }

    /// The registered connection on `slot`, if any.
    pub fn registered_connection(&self, slot: Slot) -> Option<ConnectionId> {
        self.registered[slot.index()]
    }

    pub fn registered_connections(&self) -> impl Iterator<Item = (Slot, ConnectionId)> + '_ {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.registered[slot.index()].map(|conn| (slot, conn)))
    }

    pub fn holder(&self, slot: Slot) -> Option<ConnectionId> {
        self.holds[slot.index()]
    }

    pub fn occupied_count(&self) -> usize {
        self.holds.iter().filter(|h| h.is_some()).count()
    }

    pub fn status(&self) -> StatusVector {
        let mut status = StatusVector::default();
        for (slot, _) in self.registered_connections() {
            status.set(slot, true);
        }
        status
    }

    // ════════════════════════════════════════════════════════════════════
    // Status listeners
    // ════════════════════════════════════════════════════════════════════

    /// Returns false if the connection was already subscribed.
    pub fn add_listener(&mut self, connection: ConnectionId) -> bool {
        self.listeners.insert(connection)
    }

    pub fn remove_listener(&mut self, connection: &ConnectionId) -> bool {
        self.listeners.remove(connection)
    }

    pub fn listeners(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.listeners.iter().copied()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Listeners plus registered connections, each once.
    pub fn status_recipients(&self) -> Vec<ConnectionId> {
        let mut seen = HashSet::new();
        self.listeners
            .iter()
            .copied()
            .chain(self.registered_connections().map(|(_, conn)| conn))
            .filter(|conn| seen.insert(*conn))
            .collect()
    }

    // ════════════════════════════════════════════════════════════════════
    // Active bet
    // ════════════════════════════════════════════════════════════════════

    pub fn active_bet(&self) -> Option<&Bet> {
        self.active_bet.as_ref()
    }

    /// The active bet, only if it is the one identified by `bet_id`.
    pub fn active_bet_mut(&mut self, bet_id: BetId) -> Option<&mut Bet> {
        self.active_bet.as_mut().filter(|bet| bet.id() == bet_id)
    }

    /// The active bet for settlement events, which carry no bet id.
    pub fn current_bet_mut(&mut self) -> Option<&mut Bet> {
        self.active_bet.as_mut()
    }

    /// Installs a new bet, returning the one it supersedes.
    pub fn replace_active_bet(&mut self, bet: Bet) -> Option<Bet> {
        self.active_bet.replace(bet)
    }

    /// Drops the active bet if it is `bet_id`.
    pub fn remove_bet(&mut self, bet_id: BetId) -> Option<Bet> {
        if self.active_bet.as_ref().is_some_and(|bet| bet.id() == bet_id) {
            self.active_bet.take()
        } else {
            None
        }
    }
}
