//! Deferred delivery of bet timers.
//!
//! The coordinator never sleeps. It asks a `Scheduler` to hand a
//! `BetTimer` back after a delay, and the timer then arrives as an
//! ordinary event on the coordinator's queue, processed one at a time
//! alongside frames.

use std::time::Duration;

use crate::domain::bet::BetTimer;

/// Fire-and-forget timer scheduling.
///
/// Scheduled timers cannot be cancelled. Receivers must treat a timer
/// whose bet is gone as a no-op.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, timer: BetTimer);
}
