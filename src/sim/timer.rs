//! Scheduled-task handles driven by simulated time
//!
//! Timers never fire on their own; the owner feeds them the elapsed frame time
//! and acts on the number of expirations reported back.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMode {
    /// Fires once, then disarms itself
    Once,
    /// Fires every period until cancelled
    Repeating,
}

/// A cancellable countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    period: Duration,
    elapsed: Duration,
    mode: TimerMode,
    armed: bool,
}

impl Timer {
    /// A disarmed timer; call `schedule` to start it
    pub fn new(period: Duration, mode: TimerMode) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            mode,
            armed: false,
        }
    }

    /// A running periodic timer
    pub fn repeating(period: Duration) -> Self {
        let mut timer = Self::new(period, TimerMode::Repeating);
        timer.schedule(period);
        timer
    }

    /// (Re)start with a new period. Any pending countdown is discarded, so
    /// calling this twice never double-schedules.
    pub fn schedule(&mut self, period: Duration) {
        debug_assert!(!period.is_zero(), "timer period must be non-zero");
        self.period = period;
        self.elapsed = Duration::ZERO;
        self.armed = true;
    }

    /// Change the period without losing progress toward the next expiration.
    /// If the time already elapsed covers the new period, the next `advance`
    /// fires. A disarmed timer is armed from zero.
    pub fn retime(&mut self, period: Duration) {
        debug_assert!(!period.is_zero(), "timer period must be non-zero");
        if !self.armed {
            self.schedule(period);
            return;
        }
        self.period = period;
    }

    /// Stop the timer. Idempotent.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next expiration (zero when disarmed)
    pub fn remaining(&self) -> Duration {
        if self.armed {
            self.period.saturating_sub(self.elapsed)
        } else {
            Duration::ZERO
        }
    }

    /// Advance by `dt`, returning how many times the timer expired
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.armed || self.period.is_zero() {
            return 0;
        }
        self.elapsed += dt;

        let mut fired = 0;
        while self.armed && self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
            if self.mode == TimerMode::Once {
                self.cancel();
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_once_fires_exactly_at_period() {
        let mut timer = Timer::new(ms(1500), TimerMode::Once);
        assert_eq!(timer.advance(ms(1000)), 0, "disarmed timer must not fire");

        timer.schedule(ms(1500));
        assert_eq!(timer.advance(ms(1499)), 0);
        assert_eq!(timer.remaining(), ms(1));
        assert_eq!(timer.advance(ms(1)), 1);
        assert!(!timer.is_armed());
        assert_eq!(timer.advance(ms(5000)), 0);
    }

    #[test]
    fn test_repeating_counts_multiple_expirations() {
        let mut timer = Timer::repeating(ms(150));
        assert_eq!(timer.advance(ms(100)), 0);
        assert_eq!(timer.advance(ms(100)), 1);
        assert_eq!(timer.advance(ms(350)), 2);
        assert_eq!(timer.remaining(), ms(50));
    }

    #[test]
    fn test_reschedule_discards_pending_countdown() {
        let mut timer = Timer::new(ms(1500), TimerMode::Once);
        timer.schedule(ms(1500));
        timer.advance(ms(1400));

        timer.schedule(ms(1500));
        timer.schedule(ms(1500));
        assert_eq!(timer.advance(ms(1400)), 0);
        assert_eq!(timer.advance(ms(100)), 1);
        assert_eq!(timer.advance(ms(1500)), 0);
    }

    #[test]
    fn test_retime_keeps_progress() {
        let mut timer = Timer::repeating(ms(800));
        assert_eq!(timer.advance(ms(500)), 0);

        // Same period: countdown untouched
        timer.retime(ms(800));
        assert_eq!(timer.remaining(), ms(300));

        // Shorter period already covered by elapsed time fires on the next advance
        timer.retime(ms(400));
        assert_eq!(timer.advance(Duration::ZERO), 1);
        assert_eq!(timer.remaining(), ms(300));

        timer.cancel();
        timer.retime(ms(600));
        assert!(timer.is_armed());
        assert_eq!(timer.remaining(), ms(600));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timer = Timer::repeating(ms(600));
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_armed());
        assert_eq!(timer.remaining(), Duration::ZERO);
        assert_eq!(timer.advance(ms(10_000)), 0);
    }
}
