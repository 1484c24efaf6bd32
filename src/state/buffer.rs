//! Fixed-capacity scrolling sample buffer.
//!
//! Position `i` of the buffer is always plotted at x = `i`; appending moves
//! values left through the fixed positions and writes the new batch into the
//! tail, so the newest sample is always last.

/// Default number of samples kept on screen.
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000;

/// Window over the most recent `capacity` samples.
///
/// Invariant: `values.len() == capacity` at all times, `capacity >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollingBuffer {
    values: Vec<u32>,
}

impl ScrollingBuffer {
    /// Create a zero-filled buffer. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            values: vec![0; capacity.max(1)],
        }
    }

    /// Create a buffer holding exactly `values` (capacity = `values.len()`).
    ///
    /// An empty vector yields a single zero sample.
    pub fn from_values(values: Vec<u32>) -> Self {
        if values.is_empty() {
            return Self::new(1);
        }
        Self { values }
    }

    /// Number of positions (N).
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Values in position order.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Value at position `index`, if in range.
    pub fn value_at(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    /// Most recently appended sample.
    pub fn latest(&self) -> u32 {
        self.values[self.values.len() - 1]
    }

    /// Append a batch, evicting the oldest values.
    ///
    /// - empty batch: no-op
    /// - batch of `k >= N`: buffer becomes the last `N` batch values
    /// - otherwise: values shift left by `k` and the batch fills the tail
    pub fn append(&mut self, batch: &[u32]) {
        let capacity = self.values.len();
        let shift = batch.len();

        if shift == 0 {
            return;
        }

        if shift >= capacity {
            self.values.copy_from_slice(&batch[shift - capacity..]);
            return;
        }

        self.values.copy_within(shift.., 0);
        self.values[capacity - shift..].copy_from_slice(batch);
    }

    /// Smallest and largest value currently held.
    pub fn min_max(&self) -> (u32, u32) {
        self.values
            .iter()
            .fold((u32::MAX, u32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// `(position, value)` pairs whose position lies within `[x_min, x_max]`.
    pub fn positions_within(
        &self,
        x_min: f64,
        x_max: f64,
    ) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(move |(index, _)| {
                let x = *index as f64;
                x >= x_min && x <= x_max
            })
            .map(|(index, &value)| (index, value))
    }
}

impl Default for ScrollingBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_zero_filled_with_exact_capacity() {
        let buffer = ScrollingBuffer::new(4);
        assert_eq!(buffer.capacity(), 4);
        assert_eq!(buffer.values(), &[0, 0, 0, 0]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let buffer = ScrollingBuffer::new(0);
        assert_eq!(buffer.capacity(), 1);
    }

    #[test]
    fn default_capacity_is_ten_thousand() {
        assert_eq!(ScrollingBuffer::default().capacity(), 10_000);
    }

    #[test]
    fn append_short_batch_shifts_left_and_fills_tail() {
        let mut buffer = ScrollingBuffer::new(4);

        buffer.append(&[5, 6]);
        assert_eq!(buffer.values(), &[0, 0, 5, 6]);
    }

    #[test]
    fn append_long_batch_keeps_last_n() {
        let mut buffer = ScrollingBuffer::from_values(vec![0, 0, 5, 6]);

        buffer.append(&[7, 8, 9, 10, 11]);
        assert_eq!(buffer.values(), &[8, 9, 10, 11]);
    }

    #[test]
    fn append_exactly_n_replaces_everything() {
        let mut buffer = ScrollingBuffer::from_values(vec![1, 2, 3]);

        buffer.append(&[7, 8, 9]);
        assert_eq!(buffer.values(), &[7, 8, 9]);
    }

    #[test]
    fn append_empty_is_noop() {
        let mut buffer = ScrollingBuffer::from_values(vec![1, 2, 3]);

        buffer.append(&[]);
        assert_eq!(buffer.values(), &[1, 2, 3]);
    }

    #[test]
    fn successive_appends_preserve_arrival_order() {
        let mut buffer = ScrollingBuffer::new(5);

        buffer.append(&[1]);
        buffer.append(&[2, 3]);
        buffer.append(&[4]);
        assert_eq!(buffer.values(), &[0, 1, 2, 3, 4]);
        assert_eq!(buffer.latest(), 4);
    }

    #[test]
    fn value_at_out_of_range_is_none() {
        let buffer = ScrollingBuffer::from_values(vec![10, 20]);
        assert_eq!(buffer.value_at(1), Some(20));
        assert_eq!(buffer.value_at(2), None);
    }

    #[test]
    fn min_max_over_all_values() {
        let buffer = ScrollingBuffer::from_values(vec![30, 10, u32::MAX, 20]);
        assert_eq!(buffer.min_max(), (10, u32::MAX));
    }

    #[test]
    fn positions_within_is_inclusive() {
        let buffer = ScrollingBuffer::from_values(vec![10, 20, 30, 40]);

        let selected: Vec<_> = buffer.positions_within(1.0, 2.0).collect();
        assert_eq!(selected, vec![(1, 20), (2, 30)]);
    }

    #[test]
    fn positions_within_fractional_bounds() {
        let buffer = ScrollingBuffer::from_values(vec![10, 20, 30, 40]);

        let selected: Vec<_> = buffer.positions_within(0.5, 2.5).collect();
        assert_eq!(selected, vec![(1, 20), (2, 30)]);
    }
}
