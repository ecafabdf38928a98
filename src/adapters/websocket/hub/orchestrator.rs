//! Bet dispatch, settlement tracking, timeout, and cross-cancellation.
//!
//! Settlement reports and timers race freely. The `Bet` aggregate decides
//! every race (first transition out of `Pending` wins); this module only
//! turns its decisions into frames and timers.

use std::collections::HashMap;

use crate::domain::bet::{Bet, BetOrder, BetTimer, CancelOrder, DispatchError};
use crate::domain::foundation::{BetId, ConnectionId, SubjectId};
use crate::domain::room::Room;
use crate::domain::slot::{Side, Slot};
use crate::ports::{CancelScope, DualBetRequest, SingleBetRequest};

use super::super::messages::{BetErrorReport, ServerMessage};
use super::{Connection, ConnectionHandle, Hub};

/// The registered connection on `slot`, if its writer is still running.
fn reachable<'a>(
    connections: &'a HashMap<ConnectionId, Connection>,
    room: &Room,
    slot: Slot,
) -> Option<&'a ConnectionHandle> {
    room.registered_connection(slot)
        .and_then(|id| connections.get(&id))
        .map(|connection| &connection.handle)
        .filter(|handle| handle.is_open())
}

enum ErrorOutcome {
    /// No bet is tracked in the room.
    Untracked,
    /// The leg already left `Pending`.
    Discarded,
    Applied {
        bet_id: BetId,
        order: BetOrder,
        cancel: Option<(Slot, BetOrder)>,
        settled: bool,
    },
}

impl Hub {
    // ════════════════════════════════════════════════════════════════════
    // Dispatch
    // ════════════════════════════════════════════════════════════════════

    /// Sends opposite orders to both slots, or nothing at all.
    pub(super) fn place_both(&mut self, request: DualBetRequest) -> Result<BetId, DispatchError> {
        let DualBetRequest {
            subject,
            platform,
            amount,
            primary_slot,
            primary_side,
        } = request;

        let Some(room) = self.rooms.get_mut(&subject) else {
            return Err(DispatchError::Unreachable(Slot::ALL.to_vec()));
        };

        let unreachable: Vec<Slot> = Slot::ALL
            .into_iter()
            .filter(|slot| reachable(&self.connections, room, *slot).is_none())
            .collect();
        if !unreachable.is_empty() {
            tracing::warn!(subject = %subject, ?unreachable, "Dual dispatch refused");
            return Err(DispatchError::Unreachable(unreachable));
        }

        let bet = Bet::new(subject.clone(), platform, amount, primary_slot, primary_side);
        for slot in Slot::ALL {
            if let Some(handle) = reachable(&self.connections, room, slot) {
                handle.send(ServerMessage::PlaceBet(bet.order_for(slot)));
            }
        }

        let bet_id = bet.id();
        tracing::info!(
            subject = %subject,
            bet_id = %bet_id,
            platform = bet.platform(),
            amount,
            primary_slot = %primary_slot,
            primary_side = %primary_side,
            "Bet dispatched to both slots"
        );

        if let Some(previous) = room.replace_active_bet(bet) {
            if previous.has_pending() {
                tracing::warn!(
                    subject = %subject,
                    bet_id = %previous.id(),
                    "Superseded bet still had pending legs"
                );
            }
        }

        self.scheduler.schedule(
            self.settings.bet_timeout,
            BetTimer::Timeout { subject, bet_id },
        );
        Ok(bet_id)
    }

    /// Sends one order to one slot. Nothing is tracked.
    pub(super) fn place_single(&mut self, request: SingleBetRequest) -> Result<(), DispatchError> {
        let SingleBetRequest {
            subject,
            slot,
            order,
        } = request;

        let handle = self
            .rooms
            .get(&subject)
            .and_then(|room| reachable(&self.connections, room, slot))
            .ok_or_else(|| DispatchError::Unreachable(vec![slot]))?;

        tracing::info!(
            subject = %subject,
            slot = %slot,
            platform = %order.platform,
            amount = order.amount,
            side = %order.side,
            "Bet dispatched to single slot"
        );
        handle.send(ServerMessage::PlaceBet(order));
        Ok(())
    }

    /// Sends a blanket cancel to every registered slot in scope.
    pub(super) fn cancel_all(&self, scope: &CancelScope) -> usize {
        let rooms: Vec<&Room> = match scope {
            CancelScope::Room(subject) => self.rooms.get(subject).into_iter().collect(),
            CancelScope::AllRooms => self.rooms.iter().collect(),
        };

        let reached = rooms
            .into_iter()
            .flat_map(|room| room.registered_connections())
            .filter(|(_, id)| self.send_to(*id, ServerMessage::CancelBet(CancelOrder::blanket())))
            .count();

        tracing::info!(?scope, reached, "Cancel-all dispatched");
        reached
    }

    // ════════════════════════════════════════════════════════════════════
    // Settlement
    // ════════════════════════════════════════════════════════════════════

    pub(super) fn bet_success(&mut self, id: ConnectionId, slot: Slot) {
        let Some(subject) = self.settling_subject(id, slot) else {
            return;
        };
        let Some(bet) = self
            .rooms
            .get_mut(&subject)
            .and_then(|room| room.current_bet_mut())
        else {
            tracing::debug!(connection_id = %id, slot = %slot, "Success outside a tracked bet");
            return;
        };

        if !bet.record_success(slot) {
            tracing::debug!(bet_id = %bet.id(), slot = %slot, state = %bet.leg_state(slot), "Late success discarded");
            return;
        }
        tracing::info!(bet_id = %bet.id(), slot = %slot, "Leg succeeded");

        if let Some(bet_id) = bet.is_settled().then(|| bet.id()) {
            self.schedule_cleanup(subject, bet_id);
        }
    }

    pub(super) fn bet_error(
        &mut self,
        id: ConnectionId,
        slot: Slot,
        platform: Option<String>,
        amount: Option<u64>,
        side: Option<Side>,
        message: Option<String>,
    ) {
        let Some(subject) = self.settling_subject(id, slot) else {
            return;
        };
        let message = message.unwrap_or_else(|| "Unknown error".to_string());

        let outcome = match self
            .rooms
            .get_mut(&subject)
            .and_then(|room| room.current_bet_mut())
        {
            None => ErrorOutcome::Untracked,
            Some(bet) => {
                let settlement = bet.record_error(slot);
                if settlement.applied {
                    ErrorOutcome::Applied {
                        bet_id: bet.id(),
                        order: bet.order_for(slot),
                        cancel: settlement
                            .cancelled
                            .map(|partner| (partner, bet.order_for(partner))),
                        settled: bet.is_settled(),
                    }
                } else {
                    ErrorOutcome::Discarded
                }
            }
        };

        match outcome {
            ErrorOutcome::Discarded => {
                tracing::debug!(subject = %subject, slot = %slot, "Late error discarded");
            }
            ErrorOutcome::Untracked => {
                tracing::warn!(subject = %subject, slot = %slot, error = %message, "Bet error outside a tracked bet");
                let report = BetErrorReport {
                    slot,
                    message,
                    platform,
                    amount,
                    side,
                };
                self.notify_listeners(&subject, &ServerMessage::BetError(report));
            }
            ErrorOutcome::Applied {
                bet_id,
                order,
                cancel,
                settled,
            } => {
                tracing::warn!(bet_id = %bet_id, slot = %slot, error = %message, "Leg failed");
                let report = BetErrorReport {
                    slot,
                    message,
                    platform: platform.or(Some(order.platform)),
                    amount: amount.or(Some(order.amount)),
                    side: side.or(Some(order.side)),
                };
                self.notify_listeners(&subject, &ServerMessage::BetError(report));

                if let Some((partner, partner_order)) = cancel {
                    self.cross_cancel(&subject, bet_id, partner, &partner_order);
                }
                if settled {
                    self.schedule_cleanup(subject, bet_id);
                }
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Timers
    // ════════════════════════════════════════════════════════════════════

    pub(super) fn handle_timer(&mut self, timer: BetTimer) {
        match timer {
            BetTimer::Timeout { subject, bet_id } => self.expire_bet(subject, bet_id),
            BetTimer::Cleanup { subject, bet_id } => {
                let removed = self
                    .rooms
                    .get_mut(&subject)
                    .and_then(|room| room.remove_bet(bet_id));
                match removed {
                    Some(_) => tracing::debug!(subject = %subject, bet_id = %bet_id, "Bet record removed"),
                    None => tracing::trace!(bet_id = %bet_id, "Stale cleanup ignored"),
                }
            }
        }
    }

    fn expire_bet(&mut self, subject: SubjectId, bet_id: BetId) {
        let Some(bet) = self
            .rooms
            .get_mut(&subject)
            .and_then(|room| room.active_bet_mut(bet_id))
        else {
            tracing::trace!(bet_id = %bet_id, "Stale timeout ignored");
            return;
        };

        let settlement = bet.expire();
        if settlement.timed_out.is_empty() {
            return;
        }
        let cancels: Vec<(Slot, BetOrder)> = settlement
            .cancelled
            .iter()
            .map(|slot| (*slot, bet.order_for(*slot)))
            .collect();

        tracing::warn!(
            subject = %subject,
            bet_id = %bet_id,
            timed_out = ?settlement.timed_out,
            "Bet legs timed out"
        );
        for (slot, order) in cancels {
            self.cross_cancel(&subject, bet_id, slot, &order);
        }
        self.schedule_cleanup(subject, bet_id);
    }

    // ════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════

    fn cross_cancel(&self, subject: &SubjectId, bet_id: BetId, slot: Slot, order: &BetOrder) {
        let delivered = self
            .rooms
            .get(subject)
            .and_then(|room| room.registered_connection(slot))
            .is_some_and(|id| self.send_to(id, ServerMessage::CancelBet(CancelOrder::from(order))));
        tracing::warn!(bet_id = %bet_id, slot = %slot, delivered, "Cross-cancelled partner leg");
    }

    fn schedule_cleanup(&self, subject: SubjectId, bet_id: BetId) {
        tracing::debug!(bet_id = %bet_id, "Bet settled; cleanup armed");
        self.scheduler.schedule(
            self.settings.cleanup_grace,
            BetTimer::Cleanup { subject, bet_id },
        );
    }

    /// The subject of `id`, only if `id` is the connection registered on `slot`.
    fn settling_subject(&self, id: ConnectionId, slot: Slot) -> Option<SubjectId> {
        let subject = self.connections.get(&id).map(|c| c.subject.clone())?;
        let holder = self
            .rooms
            .get(&subject)
            .and_then(|room| room.registered_connection(slot));
        if holder != Some(id) {
            tracing::warn!(
                connection_id = %id,
                subject = %subject,
                slot = %slot,
                "Settlement report from a connection not registered on that slot discarded"
            );
            return None;
        }
        Some(subject)
    }
}
