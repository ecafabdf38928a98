//! GetStatusHandler - Query handler for slot connectivity.

use std::sync::Arc;

use crate::domain::bet::BetError;
use crate::domain::foundation::SubjectId;
use crate::domain::room::StatusVector;
use crate::ports::BetDispatcher;

#[derive(Debug, Clone)]
pub struct GetStatusQuery {
    pub subject: SubjectId,
}

pub struct GetStatusHandler {
    dispatcher: Arc<dyn BetDispatcher>,
}

impl GetStatusHandler {
    pub fn new(dispatcher: Arc<dyn BetDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn handle(&self, query: GetStatusQuery) -> Result<StatusVector, BetError> {
        Ok(self.dispatcher.status(query.subject).await?)
    }
}
