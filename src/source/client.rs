//! Self-healing TCP client for the RTT telemetry server.
//!
//! The client owns at most one non-blocking `mio` TCP stream. Every failure
//! (resolution, refused connect, reset, peer close) is absorbed into the
//! disconnected state; the next `receive_at` call after the reconnection
//! interval has elapsed tries again. Nothing here ever blocks the render
//! tick or returns an error past `receive_at`.

use super::LinkState;
use crate::model::{ConnectError, Endpoint};
use mio::net::TcpStream;
use std::io::{self, Read};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Minimum time between two connection attempts while disconnected.
pub const RECONNECT_INTERVAL: Duration = Duration::from_secs(2);

/// Maximum number of bytes consumed by a single receive.
pub const READ_CHUNK_SIZE: usize = 8192;

/// Socket held by the client, if any.
enum Link {
    Disconnected,
    /// `connect` returned but the handshake has not been confirmed yet.
    Connecting(TcpStream),
    Connected(TcpStream),
}

/// Outcome of checking a pending non-blocking connect.
enum Handshake {
    Pending,
    Established(SocketAddr),
    Failed(io::Error),
}

fn check_handshake(stream: &TcpStream) -> Handshake {
    match stream.take_error() {
        Ok(Some(err)) | Err(err) => return Handshake::Failed(err),
        Ok(None) => {}
    }

    match stream.peer_addr() {
        Ok(addr) => Handshake::Established(addr),
        Err(err) if err.kind() == io::ErrorKind::NotConnected => Handshake::Pending,
        Err(err) => Handshake::Failed(err),
    }
}

/// Non-blocking, auto-reconnecting stream client.
pub struct StreamClient {
    endpoint: Endpoint,
    link: Link,
    /// Total payload bytes received across all connections.
    bytes_received: u64,
    last_reconnect_attempt: Option<Instant>,
    reconnect_interval: Duration,
    read_buf: Vec<u8>,
}

impl StreamClient {
    /// Create a disconnected client for `endpoint`.
    ///
    /// No connection is attempted until `connect` or `receive_at` is called.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            link: Link::Disconnected,
            bytes_received: 0,
            last_reconnect_attempt: None,
            reconnect_interval: RECONNECT_INTERVAL,
            read_buf: vec![0; READ_CHUNK_SIZE],
        }
    }

    /// Override the reconnection interval.
    pub fn with_reconnect_interval(mut self, interval: Duration) -> Self {
        self.reconnect_interval = interval;
        self
    }

    /// Endpoint this client connects to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Current connection state.
    pub fn link_state(&self) -> LinkState {
        match self.link {
            Link::Disconnected => LinkState::Disconnected,
            Link::Connecting(_) => LinkState::Connecting,
            Link::Connected(_) => LinkState::Connected,
        }
    }

    /// Whether the connection is established.
    pub fn is_connected(&self) -> bool {
        matches!(self.link, Link::Connected(_))
    }

    /// Total bytes received (monotonic, saturating).
    pub fn bytes_received(&self) -> u64 {
        self.bytes_received
    }

    /// Time of the last connection attempt, successful or not.
    pub fn last_reconnect_attempt(&self) -> Option<Instant> {
        self.last_reconnect_attempt
    }

    /// Reconnection interval in use.
    pub fn reconnect_interval(&self) -> Duration {
        self.reconnect_interval
    }

    /// Open the connection now.
    ///
    /// # Errors
    ///
    /// Returns `ConnectError` if the endpoint cannot be resolved or the
    /// socket cannot be created. The client is left disconnected; this is
    /// not fatal to the caller.
    pub fn connect(&mut self) -> Result<(), ConnectError> {
        self.connect_at(Instant::now())
    }

    /// Open the connection, recording `now` as the attempt time.
    ///
    /// The connect itself is non-blocking: success means the handshake was
    /// started, and the link reports `Connecting` until it is confirmed.
    ///
    /// # Errors
    ///
    /// See [`StreamClient::connect`].
    pub fn connect_at(&mut self, now: Instant) -> Result<(), ConnectError> {
        self.close();
        self.last_reconnect_attempt = Some(now);

        let addr = self.endpoint.resolve()?;
        let stream = TcpStream::connect(addr).map_err(|source| ConnectError::Io {
            endpoint: self.endpoint.clone(),
            source,
        })?;

        debug!(endpoint = %self.endpoint, %addr, "Connection attempt started");
        self.link = Link::Connecting(stream);
        Ok(())
    }

    /// Perform one non-blocking receive step using the wall clock.
    pub fn receive(&mut self) -> Option<Vec<u8>> {
        self.receive_at(Instant::now())
    }

    /// Perform one non-blocking receive step at time `now`.
    ///
    /// - Disconnected: attempts a reconnect if the interval has elapsed, and
    ///   returns `None` either way.
    /// - Connecting: promotes the link once the handshake completes.
    /// - Connected: reads up to `READ_CHUNK_SIZE` bytes. No pending data,
    ///   peer close and read errors all yield `None`; the latter two close
    ///   the connection.
    pub fn receive_at(&mut self, now: Instant) -> Option<Vec<u8>> {
        if let Link::Disconnected = self.link {
            if self.reconnect_due(now) {
                if let Err(err) = self.connect_at(now) {
                    debug!(error = %err, "Reconnect attempt failed");
                }
            }
            return None;
        }

        self.poll_handshake();

        let Link::Connected(stream) = &mut self.link else {
            return None;
        };

        match stream.read(&mut self.read_buf) {
            Ok(0) => {
                info!(endpoint = %self.endpoint, "Connection closed by peer");
                self.close();
                None
            }
            Ok(len) => {
                self.bytes_received = self.bytes_received.saturating_add(len as u64);
                Some(self.read_buf[..len].to_vec())
            }
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                None
            }
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "Connection lost");
                self.close();
                None
            }
        }
    }

    /// Release the connection. Idempotent.
    pub fn close(&mut self) {
        if !matches!(self.link, Link::Disconnected) {
            debug!(endpoint = %self.endpoint, "Closing connection");
        }
        // Dropping the mio stream closes the socket
        self.link = Link::Disconnected;
    }

    fn reconnect_due(&self, now: Instant) -> bool {
        match self.last_reconnect_attempt {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.reconnect_interval,
        }
    }

    fn poll_handshake(&mut self) {
        let outcome = match &self.link {
            Link::Connecting(stream) => check_handshake(stream),
            _ => return,
        };

        match outcome {
            Handshake::Pending => {}
            Handshake::Established(addr) => {
                if let Link::Connecting(stream) =
                    std::mem::replace(&mut self.link, Link::Disconnected)
                {
                    info!(endpoint = %self.endpoint, %addr, "Connected to RTT server");
                    self.link = Link::Connected(stream);
                }
            }
            Handshake::Failed(err) => {
                debug!(endpoint = %self.endpoint, error = %err, "Connection attempt failed");
                self.close();
            }
        }
    }
}

impl Drop for StreamClient {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
