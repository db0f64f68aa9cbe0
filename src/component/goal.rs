//! Initial-load detection.
//!
//! Each added card is counted against the wall's remaining goal, which
//! shrinks as cards are admitted. The wall counts as loaded once the count
//! passes what is still wanted, or once content stops arriving for a short
//! while (the collection holds fewer items than the goal). Either way,
//! `Load` is reported exactly once.

use crate::schedule::Timer;
use std::time::{Duration, Instant};

/// Quiet period after the last card before the load counts as complete.
pub const GOAL_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Watches card additions until the initial load completes.
#[derive(Debug, Clone)]
pub struct LoadGoalWatcher {
    count: usize,
    timer: Timer,
    wait: Duration,
    finished: bool,
}

impl LoadGoalWatcher {
    /// Watcher that has seen no cards yet.
    pub fn new() -> Self {
        Self {
            count: 0,
            timer: Timer::new(),
            wait: GOAL_CHECK_INTERVAL,
            finished: false,
        }
    }

    /// A card was added at `now` and the wall still wants `remaining` more.
    /// Returns `true` when this completes the load.
    pub fn card_added(&mut self, now: Instant, remaining: usize) -> bool {
        if self.finished {
            return false;
        }
        self.count += 1;
        if self.count <= remaining {
            self.timer.arm(now, self.wait);
            return false;
        }
        self.finish();
        true
    }

    /// Returns `true` when the quiet period elapsed, completing the load.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.finished && self.timer.fire(now) {
            self.finish();
            return true;
        }
        false
    }

    /// Stop watching without reporting.
    pub fn cancel(&mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        self.timer.cancel();
        self.finished = true;
    }

    /// Cards counted so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether watching has stopped.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// When the quiet-period check is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }
}

impl Default for LoadGoalWatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn count_passing_remaining_goal_completes_immediately() {
        let start = Instant::now();
        let mut watcher = LoadGoalWatcher::new();
        // Initial goal of 6, one unit consumed per admitted card
        assert!(!watcher.card_added(start, 5));
        assert!(!watcher.card_added(start, 4));
        assert!(!watcher.card_added(start, 3));
        assert!(watcher.card_added(start, 2));
        assert!(watcher.is_finished());
        assert_eq!(watcher.count(), 4);
        assert!(!watcher.card_added(start, 100));
        assert!(!watcher.poll(start + ms(500)));
    }

    #[test]
    fn quiet_period_completes_short_collections() {
        let start = Instant::now();
        let mut watcher = LoadGoalWatcher::new();
        watcher.card_added(start, 49);
        watcher.card_added(start + ms(60), 48);

        // Second card pushed the check out to t=160
        assert!(!watcher.poll(start + ms(159)));
        assert!(watcher.poll(start + ms(160)));
        assert!(!watcher.poll(start + ms(400)));
    }

    #[test]
    fn nothing_happens_before_first_card() {
        let mut watcher = LoadGoalWatcher::new();
        assert_eq!(watcher.deadline(), None);
        assert!(!watcher.poll(Instant::now() + ms(1000)));
    }

    #[test]
    fn cancel_suppresses_report() {
        let start = Instant::now();
        let mut watcher = LoadGoalWatcher::new();
        watcher.card_added(start, 4);
        watcher.cancel();
        assert!(!watcher.poll(start + ms(200)));
        assert!(!watcher.card_added(start + ms(300), 3));
    }
}
