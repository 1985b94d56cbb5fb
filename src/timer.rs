use std::time::{Duration, Instant};

/// Fixed-timestep tick scheduler driven by a monotonic clock.
///
/// Elapsed time accumulates between calls to [`FrameTimer::advance`]; each
/// call consumes at most one interval. Time beyond one pending interval is
/// dropped so a stalled loop does not replay a burst of ticks.
pub struct FrameTimer {
    interval: Duration,
    last: Instant,
    accumulator: Duration,
}

impl FrameTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        assert!(!interval.is_zero(), "tick interval must be non-zero");
        Self {
            interval,
            last: now,
            accumulator: Duration::ZERO,
        }
    }

    /// Account for time up to `now`; returns true when a tick is due
    pub fn advance(&mut self, now: Instant) -> bool {
        self.accumulator += now.saturating_duration_since(self.last);
        self.last = now;

        if self.accumulator < self.interval {
            return false;
        }

        self.accumulator -= self.interval;
        if self.accumulator >= self.interval {
            log::debug!(
                "Dropping {:.0?} of tick backlog",
                self.accumulator - self.interval
            );
            self.accumulator = self.interval;
        }
        true
    }

    /// When the next tick becomes due
    pub fn next_deadline(&self) -> Instant {
        self.last + self.interval.saturating_sub(self.accumulator)
    }
}
