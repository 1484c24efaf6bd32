//! Received-bytes rate over a rolling one-second window.

use std::time::{Duration, Instant};

/// Minimum time between two rate recomputations.
pub const THROUGHPUT_WINDOW: Duration = Duration::from_secs(1);

/// Tracks kB/s from the client's cumulative byte counter.
///
/// The rate is only recomputed once a full window has elapsed; between
/// recomputations the previous figure is reported unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ThroughputMeter {
    window_start: Instant,
    bytes_at_start: u64,
    kbps: f64,
}

impl ThroughputMeter {
    /// Meter whose first window starts at `now` with `total_bytes` already counted.
    pub fn new(now: Instant, total_bytes: u64) -> Self {
        Self {
            window_start: now,
            bytes_at_start: total_bytes,
            kbps: 0.0,
        }
    }

    /// Last computed rate in kB/s (1 kB = 1024 bytes).
    pub fn kbps(&self) -> f64 {
        self.kbps
    }

    /// Feed the cumulative byte count. Returns true if the rate was recomputed.
    pub fn update(&mut self, now: Instant, total_bytes: u64) -> bool {
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < THROUGHPUT_WINDOW {
            return false;
        }

        let delta = total_bytes.saturating_sub(self.bytes_at_start);
        self.kbps = delta as f64 / 1024.0 / elapsed.as_secs_f64();
        self.window_start = now;
        self.bytes_at_start = total_bytes;
        true
    }
}
