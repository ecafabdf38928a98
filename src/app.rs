//! Router assembly shared by the binary and the end-to-end tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::http::{bet_router, BetAppState};
use crate::adapters::websocket::{websocket_router, GatewayState, HubHandle};
use crate::config::AppConfig;
use crate::ports::TokenVerifier;

/// Builds the full application: `/ws` for slot workers and `/api/*` for the
/// operator front end.
pub fn router(config: &AppConfig, hub: HubHandle, verifier: Arc<dyn TokenVerifier>) -> Router {
    let gateway = GatewayState::new(
        hub.clone(),
        verifier.clone(),
        config.session.handshake_timeout(),
    );
    let api = bet_router(
        BetAppState::new(Arc::new(hub), config.auth.admin_subject.clone()),
        verifier,
    )
    .layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )));

    websocket_router(gateway).merge(api).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(config)),
    )
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        if config.is_production() {
            CorsLayer::new()
        } else {
            CorsLayer::permissive()
        }
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}
