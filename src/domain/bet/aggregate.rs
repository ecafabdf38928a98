//! Bet aggregate - a two-sided command transaction.
//!
//! A `Bet` exists only once both legs were dispatched. Settlement events
//! race with the timeout; the aggregate resolves every race with a single
//! rule: the first transition out of `Pending` wins and later events for
//! that leg are discarded.
//!
//! Cross-cancellation: whenever one leg is `Error` or `Timeout` while its
//! partner is still `Pending`, the partner becomes `Cancelled` and the
//! caller is told to send it a `cancelBet`.

use crate::domain::foundation::{BetId, StateMachine, SubjectId, Timestamp};
use crate::domain::slot::{Side, Slot};

use super::{BetOrder, LegState};

/// One side of the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    pub slot: Slot,
    pub side: Side,
    pub state: LegState,
}

/// Outcome of applying a `betError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorSettlement {
    /// False when the leg had already left `Pending`; nothing changed.
    pub applied: bool,
    /// The partner leg that must receive a `cancelBet`.
    pub cancelled: Option<Slot>,
}

/// Outcome of the settlement deadline firing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeoutSettlement {
    pub timed_out: Vec<Slot>,
    pub cancelled: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bet {
    id: BetId,
    subject: SubjectId,
    platform: String,
    amount: u64,
    primary_slot: Slot,
    legs: [Leg; 2],
    created_at: Timestamp,
}

impl Bet {
    /// Creates a bet with both legs pending.
    ///
    /// The primary slot backs `primary_side`; the opposite slot backs the
    /// opposite side.
    pub fn new(
        subject: SubjectId,
        platform: impl Into<String>,
        amount: u64,
        primary_slot: Slot,
        primary_side: Side,
    ) -> Self {
        let primary = Leg {
            slot: primary_slot,
            side: primary_side,
            state: LegState::Pending,
        };
        let partner = Leg {
            slot: primary_slot.opposite(),
            side: primary_side.opposite(),
            state: LegState::Pending,
        };
        let legs = match primary_slot {
            Slot::Slot1 => [primary, partner],
            Slot::Slot2 => [partner, primary],
        };

        Self {
            id: BetId::new(),
            subject,
            platform: platform.into(),
            amount,
            primary_slot,
            legs,
            created_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> BetId {
        self.id
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn primary_slot(&self) -> Slot {
        self.primary_slot
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn leg(&self, slot: Slot) -> &Leg {
        &self.legs[slot.index()]
    }

    pub fn leg_state(&self, slot: Slot) -> LegState {
        self.leg(slot).state
    }

    /// The order this bet sends to `slot`.
    pub fn order_for(&self, slot: Slot) -> BetOrder {
        BetOrder {
            platform: self.platform.clone(),
            amount: self.amount,
            side: self.leg(slot).side,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.legs.iter().any(|leg| leg.state.is_pending())
    }

    /// True once no leg is `Pending`. The record is inert from then on.
    pub fn is_settled(&self) -> bool {
        !self.has_pending()
    }

    /// Applies `betSuccess`. Never affects the partner leg.
    pub fn record_success(&mut self, slot: Slot) -> bool {
        self.transition(slot, LegState::Success)
    }

    /// Applies `betError`, cross-cancelling a pending partner.
    pub fn record_error(&mut self, slot: Slot) -> ErrorSettlement {
        if !self.transition(slot, LegState::Error) {
            return ErrorSettlement {
                applied: false,
                cancelled: None,
            };
        }
        ErrorSettlement {
            applied: true,
            cancelled: self.cross_cancel().into_iter().next(),
        }
    }

    /// Applies the settlement deadline.
    ///
    /// Every pending leg times out first; cross-cancellation is evaluated
    /// afterwards, so two legs that time out together are not cancelled
    /// against each other.
    pub fn expire(&mut self) -> TimeoutSettlement {
        let timed_out: Vec<Slot> = Slot::ALL
            .into_iter()
            .filter(|slot| self.transition(*slot, LegState::Timeout))
            .collect();

        TimeoutSettlement {
            timed_out,
            cancelled: self.cross_cancel(),
        }
    }

    fn cross_cancel(&mut self) -> Vec<Slot> {
        let mut cancelled = Vec::new();
        for slot in Slot::ALL {
            let partner = slot.opposite();
            if self.leg_state(slot).is_failure()
                && self.leg_state(partner).is_pending()
                && self.transition(partner, LegState::Cancelled)
            {
                cancelled.push(partner);
            }
        }
        cancelled
    }

    fn transition(&mut self, slot: Slot, target: LegState) -> bool {
        let leg = &mut self.legs[slot.index()];
        match leg.state.transition_to(target) {
            Ok(next) => {
                leg.state = next;
                true
            }
            Err(_) => false,
        }
    }
}
