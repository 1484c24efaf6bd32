//! Telemetry input sources (impure edge).
//!
//! This module provides the byte stream feeding the scope:
//! - `StreamClient` for the self-healing TCP connection to the RTT server
//! - `SampleDecoder` for turning raw bytes into little-endian 32-bit samples
//! - `SampleSource`, the seam the session pulls bytes through

use std::time::Instant;

pub mod client;
pub mod decoder;

pub use client::{StreamClient, READ_CHUNK_SIZE, RECONNECT_INTERVAL};
pub use decoder::{decode_words, SampleDecoder, WORD_SIZE};

/// Connection state of a source, as shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkState {
    /// No connection; a reconnect is attempted once the retry interval passes.
    Disconnected,
    /// Non-blocking connect issued, handshake not yet confirmed.
    Connecting,
    /// Connected and readable.
    Connected,
}

/// Byte source polled once per tick.
///
/// Implementations never block and never fail past their boundary: all
/// connection problems are absorbed into `LinkState::Disconnected`.
pub trait SampleSource {
    /// Perform one non-blocking receive step at time `now`.
    ///
    /// Returns the bytes read, or `None` if nothing was available (including
    /// while disconnected or reconnecting).
    fn receive_at(&mut self, now: Instant) -> Option<Vec<u8>>;

    /// Current connection state.
    fn link_state(&self) -> LinkState;

    /// Total bytes received over the lifetime of the source (saturating).
    fn bytes_received(&self) -> u64;

    /// Release the connection. Idempotent.
    fn close(&mut self);
}

impl SampleSource for StreamClient {
    fn receive_at(&mut self, now: Instant) -> Option<Vec<u8>> {
        StreamClient::receive_at(self, now)
    }

    fn link_state(&self) -> LinkState {
        StreamClient::link_state(self)
    }

    fn bytes_received(&self) -> u64 {
        StreamClient::bytes_received(self)
    }

    fn close(&mut self) {
        StreamClient::close(self)
    }
}
