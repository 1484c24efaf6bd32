//! Capped queue of samples received while paused.

use std::collections::VecDeque;

/// The backlog holds at most this many buffer-widths of samples.
pub const BACKLOG_FACTOR: usize = 10;

/// Samples accumulated while the display is frozen, oldest first.
///
/// Invariant: `len() <= limit()`. When a push would exceed the limit, the
/// oldest samples are dropped, so the backlog always holds the most recent
/// `limit()` samples received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backlog {
    samples: VecDeque<u32>,
    limit: usize,
    dropped: u64,
}

impl Backlog {
    /// Backlog sized for a buffer of `capacity` positions (`10 × capacity`).
    pub fn for_capacity(capacity: usize) -> Self {
        Self::with_limit(capacity.max(1).saturating_mul(BACKLOG_FACTOR))
    }

    /// Backlog holding at most `limit` samples (at least 1).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            limit: limit.max(1),
            dropped: 0,
        }
    }

    /// Maximum number of samples retained.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples dropped by the cap since creation.
    pub fn dropped_total(&self) -> u64 {
        self.dropped
    }

    /// Held samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.samples.iter().copied()
    }

    /// Append a batch in arrival order. Returns how many old samples were dropped.
    pub fn push_batch(&mut self, batch: &[u32]) -> usize {
        // A batch at least as large as the limit replaces everything
        if batch.len() >= self.limit {
            let dropped = self.samples.len() + (batch.len() - self.limit);
            self.samples.clear();
            self.samples.extend(&batch[batch.len() - self.limit..]);
            self.dropped += dropped as u64;
            return dropped;
        }

        self.samples.extend(batch);
        let excess = self.samples.len().saturating_sub(self.limit);
        if excess > 0 {
            self.samples.drain(..excess);
            self.dropped += excess as u64;
        }
        excess
    }

    /// Remove and return every held sample, oldest first.
    pub fn drain(&mut self) -> Vec<u32> {
        self.samples.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_ten_buffer_widths() {
        assert_eq!(Backlog::for_capacity(4).limit(), 40);
        assert_eq!(Backlog::for_capacity(10_000).limit(), 100_000);
    }

    #[test]
    fn push_keeps_arrival_order() {
        let mut backlog = Backlog::with_limit(10);
        backlog.push_batch(&[1, 2]);
        backlog.push_batch(&[3]);

        assert_eq!(backlog.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(backlog.len(), 3);
    }

    #[test]
    fn overflow_drops_oldest() {
        let mut backlog = Backlog::with_limit(4);
        backlog.push_batch(&[1, 2, 3]);
        let dropped = backlog.push_batch(&[4, 5, 6]);

        assert_eq!(dropped, 2);
        assert_eq!(backlog.iter().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
        assert_eq!(backlog.dropped_total(), 2);
    }

    #[test]
    fn batch_larger_than_limit_keeps_its_tail() {
        let mut backlog = Backlog::with_limit(3);
        backlog.push_batch(&[100]);
        let dropped = backlog.push_batch(&[1, 2, 3, 4, 5]);

        assert_eq!(dropped, 3);
        assert_eq!(backlog.iter().collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn drain_empties_in_order() {
        let mut backlog = Backlog::with_limit(10);
        backlog.push_batch(&[7, 8, 9]);

        assert_eq!(backlog.drain(), vec![7, 8, 9]);
        assert!(backlog.is_empty());
    }

    #[test]
    fn empty_push_is_noop() {
        let mut backlog = Backlog::with_limit(2);
        assert_eq!(backlog.push_batch(&[]), 0);
        assert!(backlog.is_empty());
    }
}
