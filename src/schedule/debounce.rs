//! Trailing-edge debouncer.
//!
//! Each call records a value and pushes the deadline `wait` past the call.
//! Once calls stop for `wait`, one poll yields the most recent value.

use super::timer::Timer;
use std::time::{Duration, Instant};

/// Default debounce window for container resizes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Coalesces bursts of calls into a single trailing value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    timer: Timer,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    /// Debouncer with a `wait` window.
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            timer: Timer::new(),
            pending: None,
        }
    }

    /// Record `value` and restart the window.
    pub fn call(&mut self, now: Instant, value: T) {
        self.pending = Some(value);
        self.timer.arm(now, self.wait);
    }

    /// The last value once the window has elapsed without new calls.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.timer.fire(now) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drop any pending value so nothing will be yielded. Returns the
    /// value that was waiting, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.timer.cancel();
        self.pending.take()
    }

    /// Whether a value is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// The debounce window.
    pub fn wait(&self) -> Duration {
        self.wait
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
