//! Cursor Mapper: buffer-space x coordinate → inspected sample.

use super::buffer::ScrollingBuffer;

/// Sample under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hover {
    /// Buffer position.
    pub index: usize,
    /// Value at that position.
    pub value: u32,
}

/// Map an x coordinate in buffer space to the nearest sample.
///
/// Returns `None` when `x` lies outside `[0, N)` or is not a number.
pub fn map_cursor(buffer: &ScrollingBuffer, x: f64) -> Option<Hover> {
    let capacity = buffer.capacity();
    if !(x >= 0.0 && x < capacity as f64) {
        return None;
    }

    // round() of a value in [0, N) is at most N; clamp pulls N back to N-1
    let index = (x.round() as usize).min(capacity - 1);
    buffer
        .value_at(index)
        .map(|value| Hover { index, value })
}
