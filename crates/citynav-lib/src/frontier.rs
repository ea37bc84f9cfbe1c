//! Priority-ordered frontier used by the best-first engines.

use std::cmp::Ordering;
use std::collections::{BTreeMap, VecDeque};

/// Totally ordered wrapper around an `f64` priority.
///
/// Ordering follows [`f64::total_cmp`], so NaN sorts after every finite value
/// instead of poisoning the frontier.
#[derive(Copy, Clone, Debug, Default)]
pub struct Priority(pub f64);

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Priority {
    fn from(value: f64) -> Self {
        Priority(value)
    }
}

/// Ordered multimap from priority to a FIFO queue of values.
///
/// The lowest priority is served first; values sharing a priority come out in
/// insertion order. The frontier is append-only: callers that need to
/// "decrease" a key push a new entry and discard stale ones on dequeue.
#[derive(Debug, Clone)]
pub struct PriorityFrontier<P, V> {
    buckets: BTreeMap<P, VecDeque<V>>,
    len: usize,
}

impl<P: Ord, V> Default for PriorityFrontier<P, V> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<P: Ord, V> PriorityFrontier<P, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `value` behind every value already stored at `priority`.
    pub fn enqueue(&mut self, priority: P, value: V) {
        self.buckets.entry(priority).or_default().push_back(value);
        self.len += 1;
    }

    /// Remove the oldest value of the lowest priority bucket.
    pub fn dequeue(&mut self) -> Option<V> {
        let mut bucket = self.buckets.first_entry()?;
        let value = bucket.get_mut().pop_front();
        if bucket.get().is_empty() {
            bucket.remove();
        }
        if value.is_some() {
            self.len -= 1;
        }
        value
    }

    /// Lowest priority currently queued.
    pub fn peek_priority(&self) -> Option<&P> {
        self.buckets.keys().next()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of queued values across all buckets.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }
}

impl<V> PriorityFrontier<Priority, V> {
    /// Convenience wrapper for `f64` priorities.
    pub fn push(&mut self, priority: f64, value: V) {
        self.enqueue(Priority(priority), value);
    }

    /// Lowest queued priority as a plain `f64`.
    pub fn min_priority(&self) -> Option<f64> {
        self.peek_priority().map(|priority| priority.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dequeues_lowest_priority_first() {
        let mut frontier: PriorityFrontier<Priority, &str> = PriorityFrontier::new();
        frontier.push(3.0, "c");
        frontier.push(1.0, "a");
        frontier.push(2.0, "b");

        assert_eq!(frontier.min_priority(), Some(1.0));
        assert_eq!(frontier.dequeue(), Some("a"));
        assert_eq!(frontier.dequeue(), Some("b"));
        assert_eq!(frontier.dequeue(), Some("c"));
        assert_eq!(frontier.dequeue(), None);
    }

    #[test]
    fn equal_priorities_are_fifo() {
        let mut frontier: PriorityFrontier<Priority, u32> = PriorityFrontier::new();
        frontier.push(5.0, 1);
        frontier.push(5.0, 2);
        frontier.push(4.0, 0);
        frontier.push(5.0, 3);

        let drained: Vec<_> = std::iter::from_fn(|| frontier.dequeue()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3]);
    }

    #[test]
    fn len_counts_values_not_buckets() {
        let mut frontier: PriorityFrontier<Priority, char> = PriorityFrontier::new();
        frontier.push(1.0, 'x');
        frontier.push(1.0, 'y');
        frontier.push(2.0, 'z');
        assert_eq!(frontier.len(), 3);

        frontier.dequeue();
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.min_priority(), Some(1.0));

        frontier.dequeue();
        assert_eq!(frontier.min_priority(), Some(2.0));
    }

    #[test]
    fn clear_empties_the_frontier() {
        let mut frontier: PriorityFrontier<Priority, ()> = PriorityFrontier::new();
        frontier.push(1.0, ());
        frontier.push(2.0, ());
        frontier.clear();
        assert!(frontier.is_empty());
        assert_eq!(frontier.len(), 0);
        assert_eq!(frontier.peek_priority(), None);
    }

    #[test]
    fn integer_priorities_work_too() {
        let mut frontier: PriorityFrontier<u32, &str> = PriorityFrontier::new();
        frontier.enqueue(10, "late");
        frontier.enqueue(1, "early");
        assert_eq!(frontier.peek_priority(), Some(&1));
        assert_eq!(frontier.dequeue(), Some("early"));
    }

    #[test]
    fn priority_orders_by_total_cmp() {
        assert!(Priority(1.0) < Priority(2.0));
        assert!(Priority(f64::INFINITY) < Priority(f64::NAN));
        assert_eq!(Priority(0.5), Priority::from(0.5));
    }
}
