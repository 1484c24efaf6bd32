//! Error types for the scope.
//!
//! Errors here never abort a running session. The stream client absorbs
//! `ConnectError` into its disconnected state plus a reconnection timer, and
//! the session turns `ExportError` into a one-shot status notice. Only
//! configuration, logging and terminal failures (defined next to the code
//! that produces them) are fatal, and those happen before or after the
//! render loop.

use super::endpoint::Endpoint;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to open the connection to the telemetry server.
///
/// Never fatal: the stream client marks itself disconnected and retries
/// once the reconnection interval has elapsed.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The host name could not be resolved.
    #[error("Failed to resolve {endpoint}: {source}")]
    Resolve {
        /// Endpoint that failed to resolve.
        endpoint: Endpoint,
        /// Resolver error.
        #[source]
        source: io::Error,
    },

    /// Resolution succeeded but produced no address.
    #[error("No address found for {endpoint}")]
    NoAddress {
        /// Endpoint that resolved to nothing.
        endpoint: Endpoint,
    },

    /// The socket could not be created or the connect call was rejected.
    #[error("Failed to connect to {endpoint}: {source}")]
    Io {
        /// Endpoint being connected to.
        endpoint: Endpoint,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },
}

/// Failure to write a snapshot file.
///
/// Reported to the operator through the status bar; the live stream is
/// unaffected.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Creating or writing the snapshot file failed.
    #[error("Failed to write snapshot {path:?}: {source}")]
    Io {
        /// Snapshot file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_error_message_names_endpoint() {
        let err = ConnectError::NoAddress {
            endpoint: Endpoint::new("jlink.local", 19021),
        };
        assert_eq!(err.to_string(), "No address found for jlink.local:19021");
    }

    #[test]
    fn connect_io_error_exposes_source() {
        use std::error::Error as _;

        let err = ConnectError::Io {
            endpoint: Endpoint::default(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert!(err.to_string().contains("127.0.0.1:60001"));
        assert!(err.source().is_some());
    }

    #[test]
    fn export_error_message_includes_path() {
        let err = ExportError::Io {
            path: PathBuf::from("/readonly/rtt_snapshot_20250101_000000.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("rtt_snapshot_20250101_000000.txt"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }
}
