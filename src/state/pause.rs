//! Pause/backlog controller.
//!
//! Two states, Live and Paused. While live, decoded batches go straight
//! into the scrolling buffer. While paused they are queued in the backlog;
//! resuming replays the whole backlog through the normal append path in
//! one batch, so only its last N samples survive if it outgrew the buffer.

use super::backlog::Backlog;
use super::buffer::ScrollingBuffer;

/// Whether the display follows the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StreamMode {
    /// New samples are appended as they arrive.
    #[default]
    Live,
    /// New samples are held in the backlog.
    Paused,
}

/// Where a batch went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// The batch was empty; nothing happened.
    Empty,
    /// Appended to the scrolling buffer.
    Appended,
    /// Queued in the backlog, dropping this many old backlog samples.
    Buffered {
        /// Samples evicted by the backlog cap.
        dropped: usize,
    },
}

/// Result of a pause toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Live → Paused.
    Paused,
    /// Paused → Live, having replayed this many backlog samples.
    Resumed {
        /// Backlog samples appended to the buffer.
        replayed: usize,
    },
}

/// Routes batches to the buffer or the backlog depending on the mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseController {
    mode: StreamMode,
    backlog: Backlog,
}

impl PauseController {
    /// Live controller with a backlog sized for a buffer of `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            mode: StreamMode::Live,
            backlog: Backlog::for_capacity(capacity),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> StreamMode {
        self.mode
    }

    /// Whether paused.
    pub fn is_paused(&self) -> bool {
        self.mode == StreamMode::Paused
    }

    /// Samples waiting to be replayed.
    pub fn backlog(&self) -> &Backlog {
        &self.backlog
    }

    /// Deliver one decoded batch.
    pub fn route(&mut self, batch: &[u32], buffer: &mut ScrollingBuffer) -> Routed {
        if batch.is_empty() {
            return Routed::Empty;
        }

        match self.mode {
            StreamMode::Live => {
                buffer.append(batch);
                Routed::Appended
            }
            StreamMode::Paused => Routed::Buffered {
                dropped: self.backlog.push_batch(batch),
            },
        }
    }

    /// Flip between Live and Paused, replaying the backlog on resume.
    pub fn toggle(&mut self, buffer: &mut ScrollingBuffer) -> Transition {
        match self.mode {
            StreamMode::Live => {
                self.mode = StreamMode::Paused;
                Transition::Paused
            }
            StreamMode::Paused => {
                self.mode = StreamMode::Live;
                let backlog = self.backlog.drain();
                buffer.append(&backlog);
                Transition::Resumed {
                    replayed: backlog.len(),
                }
            }
        }
    }
}
