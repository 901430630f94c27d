//! Network listener configuration.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Network listener configuration.
///
/// The port given on the command line replaces `port`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Interface to bind to (default: all IPv4 interfaces).
    #[serde(default = "default_host")]
    pub host: IpAddr,
    /// TCP port (default: 6667).
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ListenConfig {
    /// The socket address to bind.
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    6667
}
