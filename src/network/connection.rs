//! Connection - the write side of one accepted client.
//!
//! Reading happens in the gateway's reader set. A `Connection` holds the
//! sending end of a bounded queue; a writer task owns the socket's write half
//! and drains the queue through a `FramedWrite`.
//!
//! ```text
//!   Gateway::flush ──try_send──► mpsc (send_queue lines) ──► writer task
//!                                                            FramedWrite
//! ```
//!
//! Handing a line over never waits. When the queue is full or the writer has
//! gone, the line is refused and the gateway tears the connection down.
//! Dropping the `Connection` closes the queue: the writer sends whatever is
//! already queued, then shuts the socket down.

use crate::state::ClientId;
use futures_util::SinkExt;
use relay_proto::LineCodec;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::codec::FramedWrite;
use tracing::{debug, warn};

/// Why a line could not be handed to a connection's writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("send queue full")]
    QueueFull,
    #[error("writer closed")]
    Closed,
}

/// A client connection's outbound side.
#[derive(Debug)]
pub struct Connection {
    addr: SocketAddr,
    outgoing: mpsc::Sender<String>,
}

impl Connection {
    /// Start the writer task for `write_half`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(id: ClientId, addr: SocketAddr, write_half: OwnedWriteHalf, queue: usize) -> Self {
        let (outgoing_tx, mut outgoing_rx) = mpsc::channel::<String>(queue);

        tokio::spawn(async move {
            let mut writer = FramedWrite::new(write_half, LineCodec::new());
            while let Some(line) = outgoing_rx.recv().await {
                if let Err(e) = writer.send(line).await {
                    warn!(client = %id, error = %e, "write error");
                    return;
                }
            }
            if let Err(e) = writer.close().await {
                debug!(client = %id, error = %e, "shutdown after drain failed");
            }
        });

        Self {
            addr,
            outgoing: outgoing_tx,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Queue `line` (without terminator) for the writer. Never waits.
    pub fn send_line(&self, line: &str) -> Result<(), SendError> {
        self.outgoing
            .try_send(line.to_string())
            .map_err(|e| match e {
                TrySendError::Full(_) => SendError::QueueFull,
                TrySendError::Closed(_) => SendError::Closed,
            })
    }
}
