//! Network endpoint of the RTT telemetry server.

use super::error::ConnectError;
use std::fmt;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

/// Default RTT server host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default RTT server TCP port.
pub const DEFAULT_PORT: u16 = 60001;

/// Host and port of the telemetry source.
///
/// The host is kept unresolved so that every reconnection attempt
/// resolves it again (a DHCP-assigned debug adapter may move between
/// attempts).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint from a host name (or literal address) and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host name or literal address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve to the first socket address the resolver returns.
    ///
    /// Literal IPv4/IPv6 hosts are used as-is. Any other host goes through
    /// the system resolver, which blocks the calling thread until it
    /// answers; a slow resolver therefore stalls the caller once per
    /// connection attempt.
    ///
    /// # Errors
    ///
    /// Returns `ConnectError::Resolve` if resolution fails and
    /// `ConnectError::NoAddress` if it succeeds with an empty result.
    pub fn resolve(&self) -> Result<SocketAddr, ConnectError> {
        if let Some(ip) = self.literal_ip() {
            return Ok(SocketAddr::new(ip, self.port));
        }

        let mut addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| ConnectError::Resolve {
                endpoint: self.clone(),
                source,
            })?;

        addrs.next().ok_or_else(|| ConnectError::NoAddress {
            endpoint: self.clone(),
        })
    }

    /// The host as an IP address, if it is a literal one (`[::1]` included).
    pub fn literal_ip(&self) -> Option<IpAddr> {
        let host = self.host.trim();
        let unbracketed = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);
        unbracketed.parse().ok()
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bracket literal IPv6 hosts so the port separator stays unambiguous
        match self.literal_ip() {
            Some(ip @ IpAddr::V6(_)) => write!(f, "{}", SocketAddr::new(ip, self.port)),
            _ => write!(f, "{}:{}", self.host, self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_is_local_rtt_server() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.host(), "127.0.0.1");
        assert_eq!(endpoint.port(), 60001);
    }

    #[test]
    fn display_joins_host_and_port() {
        assert_eq!(Endpoint::new("jlink.local", 19021).to_string(), "jlink.local:19021");
    }

    #[test]
    fn display_brackets_ipv6_literals() {
        assert_eq!(Endpoint::new("::1", 60001).to_string(), "[::1]:60001");
        assert_eq!(Endpoint::new("[::1]", 60001).to_string(), "[::1]:60001");
    }

    #[test]
    fn resolve_literal_ipv4_address() {
        let addr = Endpoint::new("127.0.0.1", 4242).resolve().unwrap();
        assert_eq!(addr, "127.0.0.1:4242".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn literal_hosts_skip_the_resolver() {
        assert_eq!(
            Endpoint::new("10.1.2.3", 1).literal_ip(),
            Some("10.1.2.3".parse().unwrap())
        );
        assert_eq!(
            Endpoint::new("[::1]", 1).literal_ip(),
            Some("::1".parse().unwrap())
        );
        assert_eq!(Endpoint::new("jlink.local", 1).literal_ip(), None);
    }

    #[test]
    fn resolve_bracketed_ipv6_literal() {
        let addr = Endpoint::new("[::1]", 19021).resolve().unwrap();
        assert_eq!(addr, "[::1]:19021".parse::<SocketAddr>().unwrap());
    }
}
