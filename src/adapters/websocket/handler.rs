//! WebSocket upgrade handler: the connection gateway.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Wait (bounded) for the `hello` frame and verify its credential
//! 2. Hand the connection to the hub, which answers `hello{success}`
//! 3. Forward decoded frames to the hub; drain the hub's outbound queue
//! 4. Report the disconnect so the hub releases the slot
//!
//! The gateway holds no business state.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::foundation::{AuthError, ConnectionId, SubjectId};
use crate::ports::TokenVerifier;

use super::hub::{ConnectionHandle, HubEvent, HubHandle, Outbound};
use super::messages::{ClientMessage, ServerMessage};

/// Ways a handshake can fail.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Wrong first frame, missing credential, or deadline missed. Closed silently.
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// Credential rejected. The peer gets an `error` frame before close.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The socket failed or closed during the handshake.
    #[error("transport error: {0}")]
    Transport(String),
}

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct GatewayState {
    pub hub: HubHandle,
    pub verifier: Arc<dyn TokenVerifier>,
    pub handshake_timeout: Duration,
}

impl GatewayState {
    pub fn new(hub: HubHandle, verifier: Arc<dyn TokenVerifier>, handshake_timeout: Duration) -> Self {
        Self {
            hub,
            verifier,
            handshake_timeout,
        }
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<GatewayState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Runs for the lifetime of one connection.
async fn handle_socket(socket: WebSocket, state: GatewayState) {
    let connection = ConnectionId::new();
    let (mut sink, mut stream) = socket.split();

    let subject = match handshake(&mut stream, &state).await {
        Ok(subject) => subject,
        Err(err) => {
            reject(&mut sink, connection, err).await;
            return;
        }
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let accepted = state.hub.send(HubEvent::Authenticated {
        connection,
        subject,
        outbound: ConnectionHandle::new(connection, tx),
    });
    if !accepted {
        tracing::error!(connection_id = %connection, "Hub unavailable; dropping connection");
        let _ = sink.send(Message::Close(None)).await;
        return;
    }

    let mut writer = tokio::spawn(write_loop(sink, rx, connection));
    let mut reader = tokio::spawn(read_loop(stream, state.hub.clone(), connection));

    tokio::select! {
        _ = &mut writer => reader.abort(),
        _ = &mut reader => writer.abort(),
    }

    state.hub.send(HubEvent::Disconnected { connection });
}

/// Waits for `hello` and verifies its credential.
async fn handshake(
    stream: &mut SplitStream<WebSocket>,
    state: &GatewayState,
) -> Result<SubjectId, GatewayError> {
    let text = tokio::time::timeout(state.handshake_timeout, first_text_frame(stream))
        .await
        .map_err(|_| GatewayError::Protocol("handshake timed out".to_string()))??;

    let token = match ClientMessage::parse(&text) {
        Ok(ClientMessage::Hello { token: Some(token) }) if !token.trim().is_empty() => token,
        Ok(ClientMessage::Hello { .. }) => {
            return Err(GatewayError::Protocol("hello without credential".to_string()))
        }
        Ok(other) => {
            return Err(GatewayError::Protocol(format!(
                "expected hello, got {}",
                other.kind()
            )))
        }
        Err(err) => return Err(GatewayError::Protocol(format!("malformed hello: {}", err))),
    };

    Ok(state.verifier.verify(&token).await?)
}

/// The first data frame, skipping transport-level pings.
async fn first_text_frame(stream: &mut SplitStream<WebSocket>) -> Result<String, GatewayError> {
    loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => return Ok(text),
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Binary(_))) => {
                return Err(GatewayError::Protocol("binary frame before hello".to_string()))
            }
            Some(Ok(Message::Close(_))) | None => {
                return Err(GatewayError::Transport("closed before hello".to_string()))
            }
            Some(Err(err)) => return Err(GatewayError::Transport(err.to_string())),
        }
    }
}

async fn reject(sink: &mut SplitSink<WebSocket, Message>, connection: ConnectionId, err: GatewayError) {
    match &err {
        GatewayError::Auth(auth) => {
            tracing::info!(connection_id = %connection, "Handshake rejected: {}", auth);
            let _ = send_message(sink, &ServerMessage::error(auth.client_message())).await;
        }
        GatewayError::Protocol(reason) => {
            tracing::info!(connection_id = %connection, reason = %reason, "Handshake protocol violation");
        }
        GatewayError::Transport(reason) => {
            tracing::debug!(connection_id = %connection, reason = %reason, "Handshake aborted");
            return;
        }
    }
    let _ = sink.send(Message::Close(None)).await;
}

/// Drains the hub's outbound queue into the socket.
async fn write_loop(
    mut sink: SplitSink<WebSocket, Message>,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    connection: ConnectionId,
) {
    while let Some(item) = outbound.recv().await {
        match item {
            Outbound::Message(message) => {
                if let Err(e) = send_message(&mut sink, &message).await {
                    tracing::debug!(connection_id = %connection, "Send error, closing connection: {}", e);
                    break;
                }
            }
            Outbound::Close => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }
        }
    }
}

/// Decodes inbound frames and forwards them to the hub.
async fn read_loop(mut stream: SplitStream<WebSocket>, hub: HubHandle, connection: ConnectionId) {
    while let Some(result) = stream.next().await {
        let event = match result {
            Ok(Message::Text(text)) => match ClientMessage::parse(&text) {
                Ok(message) => HubEvent::Frame {
                    connection,
                    message,
                },
                Err(e) => HubEvent::Malformed {
                    connection,
                    reason: e.to_string(),
                },
            },
            Ok(Message::Binary(_)) => {
                tracing::warn!(connection_id = %connection, "Received unsupported binary message");
                continue;
            }
            Ok(Message::Ping(_) | Message::Pong(_)) => continue,
            Ok(Message::Close(_)) => {
                tracing::debug!(connection_id = %connection, "Client sent close frame");
                break;
            }
            Err(e) => {
                tracing::debug!(connection_id = %connection, "Receive error: {}", e);
                break;
            }
        };
        if !hub.send(event) {
            break;
        }
    }
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sink: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(message).map_err(axum::Error::new)?;
    sink.send(Message::Text(json)).await
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router(state: GatewayState) -> Router {
    Router::new().route("/ws", get(ws_handler)).with_state(state)
}
