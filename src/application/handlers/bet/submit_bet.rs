//! SubmitBetHandler - Command handler for issuing bets to slot workers.

use std::sync::Arc;

use crate::domain::bet::{BetError, BetOrder};
use crate::domain::foundation::{BetId, SubjectId, ValidationError};
use crate::domain::slot::{Side, Slot};
use crate::ports::{BetDispatcher, DualBetRequest, SingleBetRequest};

/// Command to place a bet on one or both slots.
///
/// `slot` and `side` arrive as caller text and are parsed here so that
/// nothing is dispatched when either is outside its fixed set.
#[derive(Debug, Clone)]
pub struct SubmitBetCommand {
    pub subject: SubjectId,
    pub slot: String,
    pub platform: String,
    pub amount: u64,
    pub side: String,
    pub single: bool,
}

/// Result of a successful submission.
///
/// Success acknowledges command issuance, not settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitBetResult {
    pub message: String,
    /// Present only for tracked two-sided bets.
    pub bet_id: Option<BetId>,
}

/// Handler for bet submission.
pub struct SubmitBetHandler {
    dispatcher: Arc<dyn BetDispatcher>,
}

impl SubmitBetHandler {
    pub fn new(dispatcher: Arc<dyn BetDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn handle(&self, cmd: SubmitBetCommand) -> Result<SubmitBetResult, BetError> {
        let slot: Slot = cmd.slot.parse()?;
        let side: Side = cmd.side.parse()?;
        let platform = cmd.platform.trim().to_string();
        if platform.is_empty() {
            return Err(ValidationError::empty_field("platform").into());
        }
        if cmd.amount == 0 {
            return Err(ValidationError::not_positive("amount").into());
        }

        if cmd.single {
            let order = BetOrder {
                platform,
                amount: cmd.amount,
                side,
            };
            self.dispatcher
                .place_single(SingleBetRequest {
                    subject: cmd.subject,
                    slot,
                    order,
                })
                .await?;
            return Ok(SubmitBetResult {
                message: format!("Bet sent to {}", slot),
                bet_id: None,
            });
        }

        let bet_id = self
            .dispatcher
            .place_both(DualBetRequest {
                subject: cmd.subject,
                platform,
                amount: cmd.amount,
                primary_slot: slot,
                primary_side: side,
            })
            .await?;

        Ok(SubmitBetResult {
            message: "Bet sent to both slots".to_string(),
            bet_id: Some(bet_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bet::DispatchError;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::room::StatusVector;
    use crate::ports::CancelScope;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingDispatcher {
        dual: Mutex<Vec<DualBetRequest>>,
        single: Mutex<Vec<SingleBetRequest>>,
        unreachable: Option<Vec<Slot>>,
    }

    impl RecordingDispatcher {
        fn unreachable(slots: Vec<Slot>) -> Self {
            Self {
                unreachable: Some(slots),
                ..Default::default()
            }
        }

        fn dispatch_count(&self) -> usize {
            self.dual.lock().unwrap().len() + self.single.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BetDispatcher for RecordingDispatcher {
        async fn place_both(&self, request: DualBetRequest) -> Result<BetId, DispatchError> {
            if let Some(slots) = &self.unreachable {
                return Err(DispatchError::Unreachable(slots.clone()));
            }
            self.dual.lock().unwrap().push(request);
            Ok(BetId::new())
        }

        async fn place_single(&self, request: SingleBetRequest) -> Result<(), DispatchError> {
            if let Some(slots) = &self.unreachable {
                return Err(DispatchError::Unreachable(slots.clone()));
            }
            self.single.lock().unwrap().push(request);
            Ok(())
        }

        async fn cancel_all(&self, _scope: CancelScope) -> Result<usize, DispatchError> {
            Ok(0)
        }

        async fn status(&self, _subject: SubjectId) -> Result<StatusVector, DispatchError> {
            Ok(StatusVector::default())
        }
    }

    fn command(slot: &str, side: &str, amount: u64, single: bool) -> SubmitBetCommand {
        SubmitBetCommand {
            subject: SubjectId::new("alice").unwrap(),
            slot: slot.to_string(),
            platform: "evo".to_string(),
            amount,
            side: side.to_string(),
            single,
        }
    }

    #[tokio::test]
    async fn dual_submission_returns_bet_id() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handler = SubmitBetHandler::new(dispatcher.clone());

        let result = handler
            .handle(command("Slot1", "Player", 1000, false))
            .await
            .unwrap();

        assert!(result.bet_id.is_some());
        let dual = dispatcher.dual.lock().unwrap();
        assert_eq!(dual[0].primary_slot, Slot::Slot1);
        assert_eq!(dual[0].primary_side, Side::Player);
        assert_eq!(dual[0].amount, 1000);
    }

    #[tokio::test]
    async fn single_submission_has_no_bet_id() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handler = SubmitBetHandler::new(dispatcher.clone());

        let result = handler
            .handle(command("PC2", "Banker", 50, true))
            .await
            .unwrap();

        assert_eq!(result.bet_id, None);
        let single = dispatcher.single.lock().unwrap();
        assert_eq!(single[0].slot, Slot::Slot2);
        assert_eq!(single[0].order.side, Side::Banker);
    }

    #[tokio::test]
    async fn unknown_side_is_rejected_before_dispatch() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handler = SubmitBetHandler::new(dispatcher.clone());

        let err = handler
            .handle(command("Slot1", "Tie", 10, false))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(dispatcher.dispatch_count(), 0);
    }

    #[tokio::test]
    async fn unknown_slot_is_rejected_before_dispatch() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handler = SubmitBetHandler::new(dispatcher.clone());

        let err = handler
            .handle(command("Slot3", "Player", 10, false))
            .await
            .unwrap_err();

        assert!(matches!(err, BetError::Validation(_)));
        assert_eq!(dispatcher.dispatch_count(), 0);
    }

    #[tokio::test]
    async fn zero_amount_is_rejected() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handler = SubmitBetHandler::new(dispatcher.clone());

        let err = handler
            .handle(command("Slot1", "Player", 0, true))
            .await
            .unwrap_err();

        assert_eq!(err, BetError::Validation(ValidationError::not_positive("amount")));
    }

    #[tokio::test]
    async fn blank_platform_is_rejected() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handler = SubmitBetHandler::new(dispatcher.clone());
        let mut cmd = command("Slot1", "Player", 10, false);
        cmd.platform = "  ".to_string();

        let err = handler.handle(cmd).await.unwrap_err();
        assert_eq!(err, BetError::Validation(ValidationError::empty_field("platform")));
    }

    #[tokio::test]
    async fn unreachable_slots_surface_as_dispatch_error() {
        let dispatcher = Arc::new(RecordingDispatcher::unreachable(vec![Slot::Slot2]));
        let handler = SubmitBetHandler::new(dispatcher);

        let err = handler
            .handle(command("Slot1", "Player", 10, false))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::SlotUnreachable);
        assert_eq!(err.to_string(), "Slot2 is not connected");
    }
}
