//! Bounded exponential backoff between push retries.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, warn};

use super::sequence::{SearchState, SequenceGuard};

/// Number of retryable failures tolerated before giving up.
pub const DEFAULT_MAX_RETRIES: u32 = 6;

/// Multiplier for the exponential delay.
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub max_retries: u32,
    pub base: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base: DEFAULT_BACKOFF_BASE,
        }
    }
}

impl BackoffPolicy {
    /// Delay before the next attempt: `2^(counter + jitter) * base`.
    ///
    /// `jitter` is clamped to `[0, 1)`.
    pub fn delay(&self, counter: u32, jitter: f64) -> Duration {
        let jitter = jitter.clamp(0.0, 1.0 - f64::EPSILON);
        self.base.mul_f64((f64::from(counter) + jitter).exp2())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Proceed,
    Wait(Duration),
    GiveUp,
}

/// Tracks consecutive retryable failures for the current search.
///
/// The counter is shared with the [`SequenceGuard`] it was created from, so a
/// new search resets it.
#[derive(Debug, Clone)]
pub struct BackoffController {
    policy: BackoffPolicy,
    state: Arc<Mutex<SearchState>>,
    interrupt: Arc<Notify>,
}

impl BackoffController {
    pub fn new(policy: BackoffPolicy, guard: &SequenceGuard) -> Self {
        Self {
            policy,
            state: guard.shared_state(),
            interrupt: guard.superseded_signal(),
        }
    }

    pub const fn policy(&self) -> BackoffPolicy {
        self.policy
    }

    fn next_step(&self) -> Step {
        let mut state = self.state.lock();
        if state.backoff == 0 {
            Step::Proceed
        } else if state.backoff >= self.policy.max_retries {
            state.backoff = 0;
            Step::GiveUp
        } else {
            Step::Wait(self.policy.delay(state.backoff, rand::random::<f64>()))
        }
    }

    /// Waits out the current backoff delay.
    ///
    /// Returns `false` once the retry ceiling is reached (and resets the
    /// counter). A sleep cut short by a newer search still returns `true`;
    /// the caller's staleness check takes it from there.
    pub async fn permits_continuation(&self) -> bool {
        match self.next_step() {
            Step::Proceed => true,
            Step::GiveUp => false,
            Step::Wait(delay) => {
                warn!(delay_ms = delay.as_millis() as u64, "backoff");
                let interrupted = self.interrupt.notified();
                tokio::select! {
                    () = tokio::time::sleep(delay) => {}
                    () = interrupted => debug!("backoff interrupted by a newer search"),
                }
                true
            }
        }
    }

    pub fn record_failure(&self) {
        let mut state = self.state.lock();
        state.backoff = state.backoff.saturating_add(1);
    }

    pub fn reset(&self) {
        self.state.lock().backoff = 0;
    }

    pub fn counter(&self) -> u32 {
        self.state.lock().backoff
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn controller() -> (SequenceGuard, BackoffController) {
        let guard = SequenceGuard::new();
        let backoff = BackoffController::new(BackoffPolicy::default(), &guard);
        (guard, backoff)
    }

    #[test]
    fn test_delay_formula() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.delay(1, 0.0), Duration::from_millis(200));
        assert_eq!(policy.delay(3, 0.0), Duration::from_millis(800));
        assert!(policy.delay(1, 0.999) < Duration::from_millis(400));
        assert!(policy.delay(5, 0.5) > Duration::from_millis(3200));
    }

    #[test]
    fn test_delay_clamps_jitter() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.delay(2, -3.0), Duration::from_millis(400));
        assert!(policy.delay(2, 7.0) < Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_failures_proceeds_immediately() {
        let (_guard, backoff) = controller();
        let start = Instant::now();

        assert!(backoff.permits_continuation().await);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_sleeps_within_jitter_window() {
        let (_guard, backoff) = controller();
        backoff.record_failure();
        let start = Instant::now();

        assert!(backoff.permits_continuation().await);

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200), "{elapsed:?}");
        assert!(elapsed <= Duration::from_millis(400), "{elapsed:?}");
        assert_eq!(backoff.counter(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ceiling_gives_up_and_resets() {
        let (_guard, backoff) = controller();
        for _ in 0..DEFAULT_MAX_RETRIES {
            backoff.record_failure();
        }

        assert!(!backoff.permits_continuation().await);
        assert_eq!(backoff.counter(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_search_interrupts_sleep() {
        let (guard, backoff) = controller();
        for _ in 0..5 {
            backoff.record_failure();
        }

        let sleeper = {
            let backoff = backoff.clone();
            tokio::spawn(async move {
                let start = Instant::now();
                let permitted = backoff.permits_continuation().await;
                (permitted, start.elapsed())
            })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        guard.start_new_search();

        let (permitted, elapsed) = sleeper.await.unwrap();
        assert!(permitted);
        assert!(elapsed < Duration::from_millis(3200), "{elapsed:?}");
        assert_eq!(backoff.counter(), 0);
    }

    #[test]
    fn test_reset_clears_counter() {
        let (_guard, backoff) = controller();
        backoff.record_failure();
        backoff.record_failure();
        assert_eq!(backoff.counter(), 2);

        backoff.reset();
        assert_eq!(backoff.counter(), 0);
    }
}
