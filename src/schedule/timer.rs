//! Cancelable one-shot timer.

use std::time::{Duration, Instant};

/// A one-shot deadline.
///
/// Arming an armed timer replaces its deadline. A timer fires at most once
/// per arming: [`Timer::fire`] returns `true` the first time it is polled at
/// or after the deadline, and disarms it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    /// A disarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) to fire `delay` after `now`.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Pending deadline.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline (zero if already due).
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fire if due: returns `true` and disarms when `now` reached the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn new_timer_is_disarmed() {
        let mut timer = Timer::new();
        assert!(!timer.is_armed());
        assert!(!timer.fire(Instant::now()));
    }

    #[test]
    fn fires_once_at_deadline() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.arm(start, MS_100);

        assert!(!timer.fire(start + Duration::from_millis(99)));
        assert!(timer.fire(start + MS_100));
        assert!(!timer.fire(start + Duration::from_millis(500)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn rearming_moves_deadline() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.arm(start, MS_100);
        timer.arm(start + Duration::from_millis(80), MS_100);
        assert!(!timer.fire(start + MS_100));
        assert!(timer.fire(start + Duration::from_millis(180)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.arm(start, MS_100);
        timer.cancel();
        assert!(!timer.fire(start + Duration::from_secs(10)));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let start = Instant::now();
        let mut timer = Timer::new();
        assert_eq!(timer.remaining(start), None);
        timer.arm(start, MS_100);
        assert_eq!(timer.remaining(start), Some(MS_100));
        assert_eq!(
            timer.remaining(start + Duration::from_secs(1)),
            Some(Duration::ZERO)
        );
    }
}
