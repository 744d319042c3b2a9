//! Repeating deadline for the time refresh

use embassy_time::{Duration, Instant};

/// Fixed-rate ticker
///
/// Periods missed while the owner was busy are skipped, not replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    next: Instant,
    period: Duration,
}

impl Interval {
    /// First tick one period after `now`
    pub fn starting_at(now: Instant, period: Duration) -> Self {
        let period = period.max(Duration::from_ticks(1));
        Self {
            next: now + period,
            period,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.next
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Return whether a tick is due at `now` and move the deadline past it.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        let late = now.as_ticks() - self.next.as_ticks();
        let periods = late / self.period.as_ticks() + 1;
        self.next = Instant::from_ticks(self.next.as_ticks() + periods * self.period.as_ticks());
        true
    }
}
