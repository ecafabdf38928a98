//! Tokio-backed timer scheduling for the hub.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::domain::bet::BetTimer;
use crate::ports::Scheduler;

use super::hub::HubEvent;

/// Sleeps on the runtime, then posts the timer back to the hub queue.
///
/// Holds a weak sender so that pending timers never keep a stopped hub's
/// queue open.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    events: mpsc::WeakUnboundedSender<HubEvent>,
}

impl TokioScheduler {
    pub fn new(events: &mpsc::UnboundedSender<HubEvent>) -> Self {
        Self {
            events: events.downgrade(),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, timer: BetTimer) {
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match events.upgrade() {
                Some(tx) => {
                    let _ = tx.send(HubEvent::Timer(timer));
                }
                None => tracing::trace!(bet_id = %timer.bet_id(), "Timer fired after hub stopped"),
            }
        });
    }
}
