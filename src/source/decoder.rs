//! Sample decoding.
//!
//! The RTT channel carries an unframed sequence of little-endian `u32`
//! words. TCP reads do not respect word boundaries, so `SampleDecoder`
//! keeps the trailing partial word of one read and completes it with the
//! head of the next.

/// Width of one sample on the wire, in bytes.
pub const WORD_SIZE: usize = 4;

/// Decode every complete word of `bytes`, dropping a trailing partial word.
///
/// Stateless: a word split across two calls is lost. Use `SampleDecoder`
/// when decoding consecutive reads of the same stream.
pub fn decode_words(bytes: &[u8]) -> Vec<u32> {
    bytes.chunks_exact(WORD_SIZE).map(word_from_le).collect()
}

fn word_from_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Stream decoder carrying partial words across reads.
#[derive(Debug, Clone, Default)]
pub struct SampleDecoder {
    /// Head of a word whose remaining bytes have not arrived yet
    /// (always shorter than `WORD_SIZE`).
    pending: Vec<u8>,
}

impl SampleDecoder {
    /// Create a decoder aligned at a word boundary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one read's worth of bytes.
    ///
    /// Returns the samples completed by this read, in stream order.
    pub fn decode(&mut self, bytes: &[u8]) -> Vec<u32> {
        let mut samples = Vec::with_capacity((self.pending.len() + bytes.len()) / WORD_SIZE);
        let mut rest = bytes;

        if !self.pending.is_empty() {
            let missing = WORD_SIZE - self.pending.len();
            let take = missing.min(rest.len());
            self.pending.extend_from_slice(&rest[..take]);
            rest = &rest[take..];

            if self.pending.len() < WORD_SIZE {
                return samples;
            }
            samples.push(word_from_le(&self.pending));
            self.pending.clear();
        }

        let words = rest.chunks_exact(WORD_SIZE);
        let tail = words.remainder();
        samples.extend(words.map(word_from_le));
        self.pending.extend_from_slice(tail);

        samples
    }

    /// Number of buffered bytes of an incomplete word.
    pub fn pending_bytes(&self) -> usize {
        self.pending.len()
    }

    /// Drop any partial word, e.g. after the connection was lost.
    pub fn reset(&mut self) {
        self.pending.clear();
    }
}
