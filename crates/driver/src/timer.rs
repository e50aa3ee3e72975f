//! Cancellable periodic tick source.
//!
//! The timer does not sleep or spawn anything. The host asks how long it may
//! wait ([`TickTimer::time_until_due`]) and then polls it with the current
//! instant. Stopping clears the schedule immediately, so a poll after
//! [`TickTimer::stop`] never reports a tick.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TickTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// (Re)start the schedule; the first tick is due one interval from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Time left until the next tick, or `None` when stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.checked_duration_since(now).unwrap_or(Duration::ZERO))
    }

    /// Report whether a tick is due at `now`, rescheduling if so.
    ///
    /// At most one tick is reported per poll; a host that fell behind does
    /// not get a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}
