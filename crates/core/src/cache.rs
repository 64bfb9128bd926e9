//! Staleness tracking for cached snapshots.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Source of monotonic time for staleness checks.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Intended for tests.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to a [`Battery`](crate::Battery).
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Decides whether cached data must be re-read.
///
/// Holds no battery data; it only remembers when the last successful
/// refresh happened and how long data stays fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshController {
    last_refresh_at: Option<Instant>,
    interval_ms: u32,
}

impl RefreshController {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            last_refresh_at: None,
            interval_ms,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.interval_ms))
    }

    /// Change the interval. Takes effect on the next staleness check.
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    pub fn last_refresh_at(&self) -> Option<Instant> {
        self.last_refresh_at
    }

    /// True before the first refresh, or once `interval` has elapsed.
    pub fn should_refresh(&self, now: Instant) -> bool {
        match self.last_refresh_at {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval(),
        }
    }

    pub fn record_refresh(&mut self, now: Instant) {
        self.last_refresh_at = Some(now);
    }

    /// Age of the cached data, if anything was ever cached.
    pub fn age(&self, now: Instant) -> Option<Duration> {
        self.last_refresh_at
            .map(|last| now.saturating_duration_since(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_before_first_refresh() {
        let controller = RefreshController::new(500);
        assert!(controller.should_refresh(Instant::now()));
        assert_eq!(controller.age(Instant::now()), None);
    }

    #[test]
    fn test_fresh_within_interval() {
        let clock = ManualClock::new();
        let mut controller = RefreshController::new(500);
        controller.record_refresh(clock.now());

        clock.advance(Duration::from_millis(100));
        assert!(!controller.should_refresh(clock.now()));

        clock.advance(Duration::from_millis(400));
        assert!(controller.should_refresh(clock.now()));
        assert_eq!(
            controller.age(clock.now()),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn test_zero_interval_is_always_stale() {
        let clock = ManualClock::new();
        let mut controller = RefreshController::new(0);
        controller.record_refresh(clock.now());
        assert!(controller.should_refresh(clock.now()));
    }

    #[test]
    fn test_shortening_interval_applies_immediately() {
        let clock = ManualClock::new();
        let mut controller = RefreshController::new(10_000);
        controller.record_refresh(clock.now());
        clock.advance(Duration::from_millis(200));
        assert!(!controller.should_refresh(clock.now()));

        controller.set_interval(100);
        assert_eq!(controller.interval_ms(), 100);
        assert!(controller.should_refresh(clock.now()));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = other.now();
        clock.advance(Duration::from_secs(3));
        assert_eq!(other.now() - start, Duration::from_secs(3));
    }
}
