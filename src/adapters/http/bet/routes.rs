//! Axum router configuration for the bet command API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::super::middleware::{auth_middleware, AuthState};
use super::handlers::{cancel_all, get_status, submit_bet, BetAppState};

/// Create the bet API router.
///
/// # Routes (all require a Bearer token)
/// - `POST /bet` - Place a bet on one or both slots
/// - `POST /bet/cancel-all` - Cancel on every registered slot
/// - `GET /status` - Slot connectivity for the caller
pub fn bet_routes() -> Router<BetAppState> {
    Router::new()
        .route("/bet", post(submit_bet))
        .route("/bet/cancel-all", post(cancel_all))
        .route("/status", get(get_status))
}

/// Create the complete bet module router, nested under `/api`.
pub fn bet_router(state: BetAppState, verifier: AuthState) -> Router {
    Router::new()
        .nest("/api", bet_routes())
        .layer(middleware::from_fn_with_state(verifier, auth_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockTokenVerifier;
    use crate::adapters::websocket::{spawn_hub, HubSettings};
    use crate::domain::foundation::SubjectId;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> Router {
        let (hub, _task) = spawn_hub(HubSettings::default());
        let verifier = MockTokenVerifier::new().with_subject("alice-token", SubjectId::new("alice").unwrap());
        bet_router(BetAppState::new(Arc::new(hub), "admin"), Arc::new(verifier))
    }

    fn post(uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unauthenticated_bet_is_401() {
        let body = r#"{"slot":"Slot1","platform":"evo","amount":100,"side":"Player"}"#;
        let response = router().oneshot(post("/api/bet", body, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn bet_without_connected_slots_is_404() {
        let body = r#"{"slot":"Slot1","platform":"evo","amount":100,"side":"Player"}"#;
        let response = router()
            .oneshot(post("/api/bet", body, Some("alice-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Slot1 and Slot2 are not connected");
    }

    #[tokio::test]
    async fn unknown_side_is_400() {
        let body = r#"{"slot":"Slot1","platform":"evo","amount":100,"side":"Tie"}"#;
        let response = router()
            .oneshot(post("/api/bet", body, Some("alice-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn cancel_all_with_no_slots_reaches_nobody() {
        let response = router()
            .oneshot(post("/api/bet/cancel-all", "{}", Some("alice-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json, serde_json::json!({"success": false, "reachedCount": 0}));
    }

    #[tokio::test]
    async fn status_reports_disconnected_slots() {
        let request = Request::builder()
            .uri("/api/status")
            .header("Authorization", "Bearer alice-token")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(
            json,
            serde_json::json!({"connected": {"Slot1": false, "Slot2": false}})
        );
    }
}
