//! HTTP handlers for the bet command API.
//!
//! These handlers connect Axum routes to the bet command handlers.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{
    CancelAllCommand, CancelAllHandler, GetStatusHandler, GetStatusQuery, SubmitBetCommand,
    SubmitBetHandler,
};
use crate::domain::bet::{BetError, DispatchError};
use crate::domain::foundation::ErrorCode;
use crate::ports::{BetDispatcher, CancelScope};

use super::super::middleware::RequireAuth;
use super::dto::{
    CancelAllRequest, CancelAllResponse, ErrorResponse, StatusResponse, SubmitBetRequest,
    SubmitBetResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct BetAppState {
    pub dispatcher: Arc<dyn BetDispatcher>,
    /// Subject allowed to cancel across every room.
    pub admin_subject: String,
}

impl BetAppState {
    pub fn new(dispatcher: Arc<dyn BetDispatcher>, admin_subject: impl Into<String>) -> Self {
        Self {
            dispatcher,
            admin_subject: admin_subject.into(),
        }
    }

    pub fn submit_bet_handler(&self) -> SubmitBetHandler {
        SubmitBetHandler::new(self.dispatcher.clone())
    }

    pub fn cancel_all_handler(&self) -> CancelAllHandler {
        CancelAllHandler::new(self.dispatcher.clone())
    }

    pub fn get_status_handler(&self) -> GetStatusHandler {
        GetStatusHandler::new(self.dispatcher.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/bet - Place a bet on one slot or on both
pub async fn submit_bet(
    State(state): State<BetAppState>,
    RequireAuth(subject): RequireAuth,
    Json(req): Json<SubmitBetRequest>,
) -> Result<impl IntoResponse, BetApiError> {
    let cmd = SubmitBetCommand {
        subject,
        slot: req.slot,
        platform: req.platform,
        amount: req.amount,
        side: req.side,
        single: req.single,
    };

    let result = state.submit_bet_handler().handle(cmd).await?;
    Ok(Json(SubmitBetResponse::from(result)))
}

/// POST /api/bet/cancel-all - Send `cancelBet` to every registered slot
///
/// With `{"allRooms": true}` the fan-out covers every room; only the admin
/// subject may ask for that.
pub async fn cancel_all(
    State(state): State<BetAppState>,
    RequireAuth(subject): RequireAuth,
    body: Option<Json<CancelAllRequest>>,
) -> Result<impl IntoResponse, BetApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let scope = if req.all_rooms {
        if subject.as_str() != state.admin_subject {
            tracing::warn!(subject = %subject, "Rejected cross-room cancel from non-admin");
            return Err(BetApiError::Forbidden);
        }
        CancelScope::AllRooms
    } else {
        CancelScope::Room(subject)
    };

    let result = state.cancel_all_handler().handle(CancelAllCommand { scope }).await?;
    Ok(Json(CancelAllResponse::from(result)))
}

/// GET /api/status - Connectivity of the caller's slots
pub async fn get_status(
    State(state): State<BetAppState>,
    RequireAuth(subject): RequireAuth,
) -> Result<impl IntoResponse, BetApiError> {
    let connected = state
        .get_status_handler()
        .handle(GetStatusQuery { subject })
        .await?;
    Ok(Json(StatusResponse { connected }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub enum BetApiError {
    Bet(BetError),
    Forbidden,
}

impl From<BetError> for BetApiError {
    fn from(err: BetError) -> Self {
        BetApiError::Bet(err)
    }
}

impl IntoResponse for BetApiError {
    fn into_response(self) -> Response {
        match self {
            BetApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new(
                    ErrorCode::Forbidden.to_string(),
                    "Cancelling across all rooms requires the admin subject",
                )),
            )
                .into_response(),
            BetApiError::Bet(BetError::Validation(e)) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), e.to_string())),
            )
                .into_response(),
            BetApiError::Bet(BetError::Dispatch(e @ DispatchError::Unreachable(_))) => (
                StatusCode::NOT_FOUND,
                Json(SubmitBetResponse::failure(e.to_string())),
            )
                .into_response(),
            BetApiError::Bet(BetError::Dispatch(e @ DispatchError::Unavailable(_))) => {
                tracing::error!("Bet dispatcher unavailable: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorResponse::new(e.code().to_string(), "Bet service unavailable")),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BetId, SubjectId, ValidationError};
    use crate::domain::room::StatusVector;
    use crate::domain::slot::Slot;
    use crate::ports::{DualBetRequest, SingleBetRequest};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeDispatcher {
        scopes: Mutex<Vec<CancelScope>>,
        dual_error: Option<DispatchError>,
    }

    impl FakeDispatcher {
        fn ok() -> Self {
            Self {
                scopes: Mutex::new(Vec::new()),
                dual_error: None,
            }
        }

        fn failing(err: DispatchError) -> Self {
            Self {
                scopes: Mutex::new(Vec::new()),
                dual_error: Some(err),
            }
        }
    }

    #[async_trait]
    impl BetDispatcher for FakeDispatcher {
        async fn place_both(&self, _req: DualBetRequest) -> Result<BetId, DispatchError> {
            match &self.dual_error {
                Some(e) => Err(e.clone()),
                None => Ok(BetId::new()),
            }
        }

        async fn place_single(&self, _req: SingleBetRequest) -> Result<(), DispatchError> {
            Ok(())
        }

        async fn cancel_all(&self, scope: CancelScope) -> Result<usize, DispatchError> {
            self.scopes.lock().unwrap().push(scope);
            Ok(1)
        }

        async fn status(&self, _subject: SubjectId) -> Result<StatusVector, DispatchError> {
            Ok(StatusVector::default())
        }
    }

    fn state(dispatcher: FakeDispatcher) -> (BetAppState, Arc<FakeDispatcher>) {
        let dispatcher = Arc::new(dispatcher);
        (BetAppState::new(dispatcher.clone(), "admin"), dispatcher)
    }

    fn auth(subject: &str) -> RequireAuth {
        RequireAuth(SubjectId::new(subject).unwrap())
    }

    fn bet_request(single: bool) -> Json<SubmitBetRequest> {
        Json(SubmitBetRequest {
            slot: "Slot1".to_string(),
            platform: "evo".to_string(),
            amount: 1000,
            side: "Player".to_string(),
            single,
        })
    }

    #[tokio::test]
    async fn submit_bet_returns_bet_id_for_dual_dispatch() {
        let (state, _) = state(FakeDispatcher::ok());

        let response = submit_bet(State(state), auth("alice"), bet_request(false))
            .await
            .map(IntoResponse::into_response)
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unreachable_slot_maps_to_404() {
        let (state, _) = state(FakeDispatcher::failing(DispatchError::Unreachable(vec![Slot::Slot2])));

        let err = submit_bet(State(state), auth("alice"), bet_request(false))
            .await
            .err()
            .unwrap();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unavailable_dispatcher_maps_to_503() {
        let (state, _) = state(FakeDispatcher::failing(DispatchError::unavailable("hub stopped")));

        let err = submit_bet(State(state), auth("alice"), bet_request(false))
            .await
            .err()
            .unwrap();

        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn validation_error_maps_to_400() {
        let err = BetApiError::from(BetError::from(ValidationError::not_positive("amount")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn cancel_all_without_body_targets_own_room() {
        let (state, dispatcher) = state(FakeDispatcher::ok());

        cancel_all(State(state), auth("alice"), None).await.unwrap();

        assert_eq!(
            dispatcher.scopes.lock().unwrap().as_slice(),
            &[CancelScope::Room(SubjectId::new("alice").unwrap())]
        );
    }

    #[tokio::test]
    async fn all_rooms_is_forbidden_for_regular_subjects() {
        let (state, dispatcher) = state(FakeDispatcher::ok());

        let err = cancel_all(
            State(state),
            auth("alice"),
            Some(Json(CancelAllRequest { all_rooms: true })),
        )
        .await
        .err()
        .unwrap();

        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
        assert!(dispatcher.scopes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_may_cancel_all_rooms() {
        let (state, dispatcher) = state(FakeDispatcher::ok());

        cancel_all(
            State(state),
            auth("admin"),
            Some(Json(CancelAllRequest { all_rooms: true })),
        )
        .await
        .unwrap();

        assert_eq!(dispatcher.scopes.lock().unwrap().as_slice(), &[CancelScope::AllRooms]);
    }
}
