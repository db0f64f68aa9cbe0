//! Deferred work: clocks, one-shot timers and the trailing-edge debouncer.
//!
//! Nothing here spawns threads or registers callbacks. A timer is a plain
//! owned value holding an optional deadline; its owner polls it with the
//! current instant from a [`Clock`]. Dropping or cancelling the owner
//! therefore cancels the timer: a destroyed wall can never be called back.
//!
//! - [`Timer`]: cancelable one-shot deadline
//! - [`Debouncer`]: coalesces bursts of calls, keeping the last value

pub mod debounce;
pub mod timer;

pub use debounce::Debouncer;
pub use timer::Timer;

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for tests and replays.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    /// Start at the current instant.
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Move time forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);
        clock.advance_ms(250);
        assert_eq!(clock.now() - start, Duration::from_millis(250));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
