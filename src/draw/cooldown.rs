//! Per-user draw cooldown.
//!
//! Process-local and intentionally volatile: a restart makes every user
//! ready again.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

/// Result of a cooldown check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cooldown {
    Ready,
    /// Time left until the user may draw again. Always non-zero.
    Blocked(Duration),
}

/// Tracks the last successful draw of each user.
#[derive(Debug, Default)]
pub struct CooldownTracker {
    last_grant: Mutex<FxHashMap<String, Instant>>,
}

impl CooldownTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FxHashMap<String, Instant>> {
        self.last_grant.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(last: Option<&Instant>, now: Instant, window: Duration) -> Cooldown {
        let Some(last) = last else {
            return Cooldown::Ready;
        };
        let elapsed = now.saturating_duration_since(*last);
        if elapsed >= window {
            Cooldown::Ready
        } else {
            Cooldown::Blocked(window - elapsed)
        }
    }

    /// Check the cooldown without recording anything.
    #[must_use]
    pub fn peek(&self, user_id: &str, now: Instant, window: Duration) -> Cooldown {
        Self::check(self.lock().get(user_id), now, window)
    }

    /// Check the cooldown and, if ready, record `now` in the same step.
    ///
    /// Of several concurrent calls for one user inside a window, at most
    /// one observes `Ready`. Stamps whose window has ended are dropped when
    /// a new one is recorded.
    pub fn try_consume(&self, user_id: &str, now: Instant, window: Duration) -> Cooldown {
        let mut last_grant = self.lock();
        let status = Self::check(last_grant.get(user_id), now, window);
        if status == Cooldown::Ready {
            last_grant.retain(|_, last| now.saturating_duration_since(*last) < window);
            last_grant.insert(user_id.to_string(), now);
        }
        status
    }

    /// Number of users currently holding a stamp.
    #[must_use]
    pub fn tracked_users(&self) -> usize {
        self.lock().len()
    }

    /// Undo a `try_consume` made at `consumed_at` whose draw did not happen.
    ///
    /// Has no effect if a later draw already replaced the stamp.
    pub fn release(&self, user_id: &str, consumed_at: Instant) {
        let mut last_grant = self.lock();
        if last_grant.get(user_id) == Some(&consumed_at) {
            last_grant.remove(user_id);
        }
    }

    /// Forget every user's cooldown.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_unknown_user_is_ready() {
        let tracker = CooldownTracker::new();
        assert_eq!(tracker.peek("u1", Instant::now(), HOUR), Cooldown::Ready);
    }

    #[test]
    fn test_consume_then_blocked() {
        let tracker = CooldownTracker::new();
        let t0 = Instant::now();

        assert_eq!(tracker.try_consume("u1", t0, HOUR), Cooldown::Ready);
        assert_eq!(
            tracker.try_consume("u1", t0 + Duration::from_secs(600), HOUR),
            Cooldown::Blocked(Duration::from_secs(3000))
        );
        assert_eq!(
            tracker.try_consume("u1", t0 + HOUR - Duration::from_millis(1), HOUR),
            Cooldown::Blocked(Duration::from_millis(1))
        );
        assert_eq!(tracker.try_consume("u1", t0 + HOUR, HOUR), Cooldown::Ready);
    }

    #[test]
    fn test_blocked_does_not_extend_window() {
        let tracker = CooldownTracker::new();
        let t0 = Instant::now();

        tracker.try_consume("u1", t0, HOUR);
        tracker.try_consume("u1", t0 + Duration::from_secs(10), HOUR);

        assert_eq!(
            tracker.peek("u1", t0 + Duration::from_secs(20), HOUR),
            Cooldown::Blocked(Duration::from_secs(3580))
        );
    }

    #[test]
    fn test_users_independent() {
        let tracker = CooldownTracker::new();
        let t0 = Instant::now();

        tracker.try_consume("u1", t0, HOUR);
        assert_eq!(tracker.try_consume("u2", t0, HOUR), Cooldown::Ready);
    }

    #[test]
    fn test_release() {
        let tracker = CooldownTracker::new();
        let t0 = Instant::now();
        let t1 = t0 + HOUR;

        tracker.try_consume("u1", t0, HOUR);
        tracker.try_consume("u1", t1, HOUR);

        // Stale release is ignored.
        tracker.release("u1", t0);
        assert!(matches!(tracker.peek("u1", t1, HOUR), Cooldown::Blocked(_)));

        tracker.release("u1", t1);
        assert_eq!(tracker.peek("u1", t1, HOUR), Cooldown::Ready);
    }

    #[test]
    fn test_zero_window_always_ready() {
        let tracker = CooldownTracker::new();
        let t0 = Instant::now();

        assert_eq!(tracker.try_consume("u1", t0, Duration::ZERO), Cooldown::Ready);
        assert_eq!(tracker.try_consume("u1", t0, Duration::ZERO), Cooldown::Ready);
    }

    #[test]
    fn test_expired_stamps_are_pruned() {
        let tracker = CooldownTracker::new();
        let t0 = Instant::now();

        tracker.try_consume("u1", t0, HOUR);
        tracker.try_consume("u2", t0 + Duration::from_secs(1800), HOUR);
        assert_eq!(tracker.tracked_users(), 2);

        // u1's window has ended, u2's has not.
        tracker.try_consume("u3", t0 + HOUR, HOUR);
        assert_eq!(tracker.tracked_users(), 2);
        assert_eq!(tracker.peek("u1", t0 + HOUR, HOUR), Cooldown::Ready);
        assert!(matches!(
            tracker.peek("u2", t0 + HOUR, HOUR),
            Cooldown::Blocked(_)
        ));

        tracker.try_consume("u4", t0 + HOUR * 3, HOUR);
        assert_eq!(tracker.tracked_users(), 1);
    }

    #[test]
    fn test_clear() {
        let tracker = CooldownTracker::new();
        let t0 = Instant::now();

        tracker.try_consume("u1", t0, HOUR);
        tracker.clear();
        assert_eq!(tracker.peek("u1", t0, HOUR), Cooldown::Ready);
    }
}
