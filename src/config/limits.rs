//! Connection and framing limits configuration.

use serde::Deserialize;

/// Connection and framing limits.
///
/// These bound the resources a single process or a single client can claim.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum simultaneously connected clients (default: 100).
    /// Connections beyond this are refused at accept time.
    #[serde(default = "default_max_clients")]
    pub max_clients: usize,
    /// Bytes requested from a socket per read (default: 512).
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
    /// Longest accepted line, terminator excluded (default: 512).
    /// Longer lines are discarded with an error reply.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Lines that may wait for one client's socket (default: 256).
    /// A client whose queue is full is disconnected.
    #[serde(default = "default_send_queue")]
    pub send_queue: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_clients: default_max_clients(),
            read_buffer_size: default_read_buffer_size(),
            max_line_length: default_max_line_length(),
            send_queue: default_send_queue(),
        }
    }
}

fn default_max_clients() -> usize {
    100
}

fn default_read_buffer_size() -> usize {
    512
}

fn default_max_line_length() -> usize {
    relay_proto::line::DEFAULT_MAX_LEN
}

fn default_send_queue() -> usize {
    256
}
