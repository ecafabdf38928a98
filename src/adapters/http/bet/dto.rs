//! Request and response bodies for the bet command API.

use serde::{Deserialize, Serialize};

use crate::application::{CancelAllResult, SubmitBetResult};
use crate::domain::foundation::BetId;
use crate::domain::room::StatusVector;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// `POST /api/bet`
///
/// `slot` names the primary slot; with `single` unset the opposite side goes
/// to the other slot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBetRequest {
    #[serde(alias = "pc")]
    pub slot: String,
    pub platform: String,
    pub amount: u64,
    pub side: String,
    #[serde(default)]
    pub single: bool,
}

/// `POST /api/bet/cancel-all`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAllRequest {
    /// Cancel across every room. Admin only.
    #[serde(default)]
    pub all_rooms: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBetResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_id: Option<BetId>,
}

impl SubmitBetResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            bet_id: None,
        }
    }
}

impl From<SubmitBetResult> for SubmitBetResponse {
    fn from(result: SubmitBetResult) -> Self {
        Self {
            success: true,
            message: result.message,
            bet_id: result.bet_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAllResponse {
    pub success: bool,
    pub reached_count: usize,
}

impl From<CancelAllResult> for CancelAllResponse {
    fn from(result: CancelAllResult) -> Self {
        Self {
            success: result.success(),
            reached_count: result.reached_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    pub connected: StatusVector,
}

/// Error body for failures that are not a bet outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
