//! Search sequencing.
//!
//! Every translate call takes a new sequence id. A retry may only resume if
//! its id is still the latest one; otherwise a newer search superseded it and
//! it must stop without sending anything.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;

/// State shared by the sequence guard and the backoff controller.
///
/// Both counters live behind one mutex so that resetting backoff and
/// allocating a new sequence id happen as a single step.
#[derive(Debug, Default)]
pub(crate) struct SearchState {
    pub(crate) sequence: u64,
    pub(crate) backoff: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SequenceGuard {
    state: Arc<Mutex<SearchState>>,
    superseded: Arc<Notify>,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets backoff and returns a sequence id greater than any issued before.
    ///
    /// Retries sleeping in backoff are woken so they notice they are stale.
    pub fn start_new_search(&self) -> u64 {
        let sequence = {
            let mut state = self.state.lock();
            state.backoff = 0;
            state.sequence += 1;
            state.sequence
        };
        self.superseded.notify_waiters();
        sequence
    }

    /// Returns `true` if `sequence` is still the latest issued id.
    pub fn is_current(&self, sequence: u64) -> bool {
        self.state.lock().sequence == sequence
    }

    /// The latest issued id, or 0 before the first search.
    pub fn current(&self) -> u64 {
        self.state.lock().sequence
    }

    pub(crate) fn shared_state(&self) -> Arc<Mutex<SearchState>> {
        Arc::clone(&self.state)
    }

    pub(crate) fn superseded_signal(&self) -> Arc<Notify> {
        Arc::clone(&self.superseded)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_strictly_increasing() {
        let guard = SequenceGuard::new();
        assert_eq!(guard.current(), 0);

        let first = guard.start_new_search();
        let second = guard.start_new_search();
        let third = guard.start_new_search();

        assert!(first < second && second < third);
        assert_eq!(guard.current(), third);
    }

    #[test]
    fn test_only_latest_sequence_is_current() {
        let guard = SequenceGuard::new();
        let first = guard.start_new_search();
        assert!(guard.is_current(first));

        let second = guard.start_new_search();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_new_search_resets_backoff() {
        let guard = SequenceGuard::new();
        guard.shared_state().lock().backoff = 4;

        guard.start_new_search();

        assert_eq!(guard.shared_state().lock().backoff, 0);
    }

    #[test]
    fn test_concurrent_searches_get_unique_ids() {
        let guard = SequenceGuard::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let guard = guard.clone();
                std::thread::spawn(move || {
                    (0..100).map(|_| guard.start_new_search()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 800);
        assert_eq!(guard.current(), 800);
    }
}
