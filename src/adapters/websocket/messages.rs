//! WebSocket message types for the slot worker protocol.
//!
//! Every frame is a JSON text frame tagged by a `type` field:
//! - Client → Server: handshake, slot assignment, liveness replies, settlement reports
//! - Server → Client: acknowledgements, status, pings, bet commands, forwarded errors

use serde::{Deserialize, Serialize};

use crate::domain::bet::{BetOrder, CancelOrder};
use crate::domain::room::StatusVector;
use crate::domain::slot::{Side, Slot};

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Handshake acknowledged.
    Hello { success: bool },

    Error { message: String },

    /// Provisional slot hold granted.
    Assignment { slot: Slot },

    /// Slot hold finalized.
    Registered { slot: Slot },

    Status { connected: StatusVector },

    /// Liveness probe; answered by `pong`.
    Ping,

    PlaceBet(BetOrder),

    CancelBet(CancelOrder),

    /// A slot reported a failure. Sent to status listeners.
    BetError(BetErrorReport),
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}

/// Settlement failure as forwarded to listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BetErrorReport {
    pub slot: Slot,
    pub message: String,
    pub platform: Option<String>,
    pub amount: Option<u64>,
    pub side: Option<Side>,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
///
/// `slot` also accepts the legacy field name `pc`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Must be the first frame on a connection.
    Hello { token: Option<String> },

    RegisterStatusListener,

    RequestAssignment,

    Register {
        #[serde(alias = "pc")]
        slot: Slot,
    },

    Pong,

    BetSuccess {
        #[serde(alias = "pc")]
        slot: Slot,
        platform: Option<String>,
        amount: Option<u64>,
        side: Option<Side>,
    },

    BetError {
        #[serde(alias = "pc")]
        slot: Slot,
        platform: Option<String>,
        amount: Option<u64>,
        side: Option<Side>,
        message: Option<String>,
    },

    /// Any tag not listed above. Logged and ignored.
    #[serde(other)]
    Unknown,
}

impl ClientMessage {
    /// Decodes a text frame.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Tag name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::Hello { .. } => "hello",
            ClientMessage::RegisterStatusListener => "registerStatusListener",
            ClientMessage::RequestAssignment => "requestAssignment",
            ClientMessage::Register { .. } => "register",
            ClientMessage::Pong => "pong",
            ClientMessage::BetSuccess { .. } => "betSuccess",
            ClientMessage::BetError { .. } => "betError",
            ClientMessage::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hello_with_token_parses() {
        let msg = ClientMessage::parse(r#"{"type":"hello","token":"abc"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Hello {
                token: Some("abc".to_string())
            }
        );
    }

    #[test]
    fn hello_without_token_parses_as_none() {
        let msg = ClientMessage::parse(r#"{"type":"hello"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Hello { token: None });
    }

    #[test]
    fn register_accepts_legacy_field_and_value() {
        let msg = ClientMessage::parse(r#"{"type":"register","pc":"PC2"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Register { slot: Slot::Slot2 });
    }

    #[test]
    fn register_with_unknown_slot_is_malformed() {
        assert!(ClientMessage::parse(r#"{"type":"register","slot":"Slot3"}"#).is_err());
    }

    #[test]
    fn unknown_tag_is_not_an_error() {
        let msg = ClientMessage::parse(r#"{"type":"heartbeat"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Unknown);
    }

    #[test]
    fn bet_error_carries_context() {
        let msg = ClientMessage::parse(
            r#"{"type":"betError","slot":"Slot1","platform":"evo","amount":100,"side":"Player","message":"chip missing"}"#,
        )
        .unwrap();
        match msg {
            ClientMessage::BetError {
                slot,
                amount,
                message,
                ..
            } => {
                assert_eq!(slot, Slot::Slot1);
                assert_eq!(amount, Some(100));
                assert_eq!(message.as_deref(), Some("chip missing"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn place_bet_serializes_flat() {
        let msg = ServerMessage::PlaceBet(BetOrder {
            platform: "evo".to_string(),
            amount: 1000,
            side: Side::Banker,
        });
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"type": "placeBet", "platform": "evo", "amount": 1000, "side": "Banker"})
        );
    }

    #[test]
    fn status_serializes_slot_map() {
        let mut connected = StatusVector::default();
        connected.set(Slot::Slot1, true);
        assert_eq!(
            serde_json::to_value(ServerMessage::Status { connected }).unwrap(),
            json!({"type": "status", "connected": {"Slot1": true, "Slot2": false}})
        );
    }

    #[test]
    fn ping_serializes_as_bare_tag() {
        assert_eq!(
            serde_json::to_value(ServerMessage::Ping).unwrap(),
            json!({"type": "ping"})
        );
    }
}
