//! Deferred events armed by the bet orchestrator.

use crate::domain::foundation::{BetId, SubjectId};

/// A scheduled firing that targets one specific bet.
///
/// Timers are never cancelled; a timer whose bet is no longer the room's
/// active bet does nothing when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BetTimer {
    /// Settlement deadline for every leg still pending.
    Timeout { subject: SubjectId, bet_id: BetId },
    /// End of the grace period; the record is dropped.
    Cleanup { subject: SubjectId, bet_id: BetId },
}

impl BetTimer {
    pub fn subject(&self) -> &SubjectId {
        match self {
            BetTimer::Timeout { subject, .. } | BetTimer::Cleanup { subject, .. } => subject,
        }
    }

    pub fn bet_id(&self) -> BetId {
        match self {
            BetTimer::Timeout { bet_id, .. } | BetTimer::Cleanup { bet_id, .. } => *bet_id,
        }
    }
}
