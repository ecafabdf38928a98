//! CancelAllHandler - Command handler for blanket cancellation.

use std::sync::Arc;

use crate::domain::bet::BetError;
use crate::ports::{BetDispatcher, CancelScope};

/// Command to cancel everything in scope.
#[derive(Debug, Clone)]
pub struct CancelAllCommand {
    pub scope: CancelScope,
}

/// Outcome of a cancel-all. Reaching nobody is a failure, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelAllResult {
    pub reached_count: usize,
}

impl CancelAllResult {
    pub fn success(&self) -> bool {
        self.reached_count > 0
    }
}

pub struct CancelAllHandler {
    dispatcher: Arc<dyn BetDispatcher>,
}

impl CancelAllHandler {
    pub fn new(dispatcher: Arc<dyn BetDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn handle(&self, cmd: CancelAllCommand) -> Result<CancelAllResult, BetError> {
        let reached_count = self.dispatcher.cancel_all(cmd.scope).await?;
        Ok(CancelAllResult { reached_count })
    }
}
