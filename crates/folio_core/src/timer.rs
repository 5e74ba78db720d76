//! Logical clock timers
//!
//! Time never advances on its own: the host drives the clock by calling
//! `drain_due(now)` with a monotonically increasing millisecond timestamp.
//! This keeps every timed behavior (banner expiry, copy confirmation)
//! deterministic under test.

use slotmap::{new_key_type, SlotMap};

/// Milliseconds on the logical page clock
pub type Millis = u64;

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

#[derive(Clone, Debug)]
struct PendingTimer<K> {
    key: K,
    deadline: Millis,
    /// Insertion sequence, breaks ties between equal deadlines
    seq: u64,
}

/// One-shot timers keyed by a caller-chosen value.
///
/// At most one timer is pending per key: scheduling a key that is already
/// pending replaces the old deadline.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    timers: SlotMap<TimerId, PendingTimer<K>>,
    next_seq: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            timers: SlotMap::with_key(),
            next_seq: 0,
        }
    }
}

impl<K: Clone + PartialEq + std::fmt::Debug> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to fire at `deadline`, replacing any pending timer for the same key
    pub fn schedule(&mut self, key: K, deadline: Millis) -> TimerId {
        self.cancel(&key);
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::trace!(?key, deadline, "timer scheduled");
        self.timers.insert(PendingTimer { key, deadline, seq })
    }

    /// Cancel the pending timer for `key`. Returns true if one was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        let existing = self
            .timers
            .iter()
            .find(|(_, timer)| &timer.key == key)
            .map(|(id, _)| id);
        match existing {
            Some(id) => {
                self.timers.remove(id);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.timers.values().any(|timer| &timer.key == key)
    }

    /// Deadline of the pending timer for `key`
    pub fn deadline(&self, key: &K) -> Option<Millis> {
        self.timers
            .values()
            .find(|timer| &timer.key == key)
            .map(|timer| timer.deadline)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.values().map(|timer| timer.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Remove and return every timer whose deadline is at or before `now`,
    /// earliest first.
    pub fn drain_due(&mut self, now: Millis) -> Vec<K> {
        let mut due: Vec<(TimerId, Millis, u64)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(id, timer)| (id, timer.deadline, timer.seq))
            .collect();
        due.sort_by_key(|&(_, deadline, seq)| (deadline, seq));

        due.into_iter()
            .filter_map(|(id, _, _)| self.timers.remove(id))
            .map(|timer| timer.key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_at_deadline_not_before() {
        let mut timers = TimerQueue::new();
        timers.schedule("banner", 5_000);

        assert!(timers.drain_due(4_999).is_empty());
        assert!(timers.is_pending(&"banner"));
        assert_eq!(timers.drain_due(5_000), vec!["banner"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut timers = TimerQueue::new();
        timers.schedule("copied", 2_000);
        timers.schedule("copied", 3_500);

        assert_eq!(timers.len(), 1);
        assert_eq!(timers.deadline(&"copied"), Some(3_500));
        assert!(timers.drain_due(2_000).is_empty());
        assert_eq!(timers.drain_due(3_500), vec!["copied"]);
    }

    #[test]
    fn test_drain_order_follows_deadline_then_insertion() {
        let mut timers = TimerQueue::new();
        timers.schedule("c", 300);
        timers.schedule("a", 100);
        timers.schedule("b", 100);

        assert_eq!(timers.next_deadline(), Some(100));
        assert_eq!(timers.drain_due(1_000), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        timers.schedule(1u32, 10);
        assert!(timers.cancel(&1));
        assert!(!timers.cancel(&1));
        assert!(timers.drain_due(100).is_empty());
    }
}
