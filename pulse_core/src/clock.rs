//! Fixed-rate tick schedule for an active session.
//!
//! The metronome never sleeps or spawns anything; the caller asks how long to
//! wait and how many ticks are due. Due times advance by whole intervals from
//! the start instant, so a late wakeup does not shift later ticks.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Metronome {
    interval: Duration,
    next_due: Instant,
}

impl Metronome {
    /// Start a schedule whose first tick is due one interval after `now`.
    ///
    /// A zero interval is raised to one millisecond.
    pub fn start(interval: Duration, now: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long to wait before the next tick is due
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Number of ticks that came due up to `now`, consuming them
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while self.next_due <= now {
            self.next_due += self.interval;
            ticks += 1;
        }
        ticks
    }
}
