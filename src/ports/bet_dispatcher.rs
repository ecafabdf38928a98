//! Command inlet used by the front end to drive slot workers.
//!
//! Implemented by the coordinator handle; every call is serialized with
//! inbound frames and timers.

use async_trait::async_trait;

use crate::domain::bet::{BetOrder, DispatchError};
use crate::domain::foundation::{BetId, SubjectId};
use crate::domain::room::StatusVector;
use crate::domain::slot::{Side, Slot};

/// Parameters of a two-sided dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualBetRequest {
    pub subject: SubjectId,
    pub platform: String,
    pub amount: u64,
    pub primary_slot: Slot,
    pub primary_side: Side,
}

/// Parameters of a one-slot dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleBetRequest {
    pub subject: SubjectId,
    pub slot: Slot,
    pub order: BetOrder,
}

/// Which rooms a cancel-all reaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelScope {
    Room(SubjectId),
    AllRooms,
}

#[async_trait]
pub trait BetDispatcher: Send + Sync {
    /// Sends opposite orders to both slots and tracks settlement.
    ///
    /// Either both slots receive an order and a bet is tracked, or neither
    /// receives anything.
    async fn place_both(&self, request: DualBetRequest) -> Result<BetId, DispatchError>;

    /// Sends one order to one slot. Nothing is tracked.
    async fn place_single(&self, request: SingleBetRequest) -> Result<(), DispatchError>;

    /// Sends a blanket cancel to every registered slot in scope.
    ///
    /// Returns how many connections were reached.
    async fn cancel_all(&self, scope: CancelScope) -> Result<usize, DispatchError>;

    /// Current connectivity of the subject's slots.
    async fn status(&self, subject: SubjectId) -> Result<StatusVector, DispatchError>;
}
