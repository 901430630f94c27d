//! Gateway - the single-threaded event loop.
//!
//! The Gateway owns the listener, every connection and the Hub. One task
//! waits on the listener, the reader set and the shutdown signal together;
//! whatever becomes ready is handled to completion, outbox included, before
//! the loop waits again.
//!
//! ```text
//!            ┌──────────────┐
//!  accept ──►│              │
//!            │   select!    ├──► Registry::dispatch ──► Outbox ──► flush
//!  readers ─►│              │                                      │
//!            └──────────────┘            teardown ◄─────────────────┘
//! ```

use crate::config::{Config, LimitsConfig};
use crate::handlers::{Context, Registry};
use crate::network::Connection;
use crate::state::{ClientId, Hub, Outbox};
use relay_proto::{Frame, LineCodec, Message, ProtocolError};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_stream::{Stream, StreamExt, StreamMap};
use tokio_util::codec::FramedRead;
use tracing::{debug, info, instrument, warn};

/// Line sent to a connection refused for capacity.
const SERVER_FULL: &[u8] = b"ERROR :Server full\r\n";

/// What a client reader yields.
#[derive(Debug)]
enum Inbound {
    Frame(Frame),
    Failed(ProtocolError),
    /// End of stream.
    Closed,
}

type Reader = Pin<Box<dyn Stream<Item = Inbound> + Send>>;

/// The Gateway accepts connections and runs the event loop.
pub struct Gateway {
    listener: TcpListener,
    hub: Hub,
    registry: Registry,
    limits: LimitsConfig,
    connections: HashMap<ClientId, Connection>,
    readers: StreamMap<ClientId, Reader>,
}

impl Gateway {
    /// Bind the listener described by `config`.
    pub async fn bind(config: &Config) -> anyhow::Result<Self> {
        let addr = config.listen.address();
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "listener bound");

        Ok(Self {
            listener,
            hub: Hub::new(config),
            registry: Registry::new(),
            limits: config.limits.clone(),
            connections: HashMap::new(),
            readers: StreamMap::new(),
        })
    }

    /// The bound address (useful when binding port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run until the process is killed.
    pub async fn run(self) -> anyhow::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Run until `shutdown` completes, then drop every connection.
    #[instrument(skip_all, name = "gateway")]
    pub async fn run_until<F>(mut self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(clients = self.connections.len(), "shutting down");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => self.on_accept(stream, addr),
                    Err(e) => warn!(error = %e, "failed to accept connection"),
                },
                Some((id, inbound)) = self.readers.next(), if !self.readers.is_empty() => {
                    self.on_inbound(id, inbound);
                }
            }
        }

        Ok(())
    }

    fn on_accept(&mut self, stream: TcpStream, addr: SocketAddr) {
        if self.hub.client_count() >= self.limits.max_clients {
            warn!(%addr, max = self.limits.max_clients, "server full, rejecting connection");
            tokio::spawn(refuse(stream, addr));
            return;
        }
        if let Err(e) = stream.set_nodelay(true) {
            debug!(%addr, error = %e, "failed to set TCP_NODELAY");
        }

        let (read_half, write_half) = stream.into_split();
        let id = self.hub.connect(addr);

        let codec = LineCodec::with_max_len(self.limits.max_line_length);
        let reader = FramedRead::with_capacity(read_half, codec, self.limits.read_buffer_size)
            .map(|item| match item {
                Ok(frame) => Inbound::Frame(frame),
                Err(e) => Inbound::Failed(e),
            })
            .chain(tokio_stream::once(Inbound::Closed));
        self.readers.insert(id, Box::pin(reader));
        self.connections.insert(
            id,
            Connection::spawn(id, addr, write_half, self.limits.send_queue),
        );

        info!(client = %id, %addr, clients = self.hub.client_count(), "connection accepted");

        let mut out = Outbox::new();
        out.send(
            id,
            format!(
                ":{} NOTICE * :You must log in with PASS first",
                self.hub.server_name()
            ),
        );
        self.flush(out);
    }

    fn on_inbound(&mut self, id: ClientId, inbound: Inbound) {
        let mut out = Outbox::new();
        match inbound {
            Inbound::Frame(Frame::Line(line)) => {
                let Ok(msg) = line.parse::<Message>() else {
                    return;
                };
                debug!(client = %id, line = %msg, "received");
                let mut ctx = Context::new(id, &mut self.hub, &mut out);
                self.registry.dispatch(&mut ctx, &msg);
            }
            Inbound::Frame(Frame::Overflow { len }) => {
                debug!(client = %id, bytes = len, "line too long");
                let mut ctx = Context::new(id, &mut self.hub, &mut out);
                self.registry.overflow(&mut ctx);
            }
            Inbound::Failed(e) => {
                warn!(client = %id, error = %e, "read failed");
                out.disconnect(id, "Read error");
            }
            Inbound::Closed => {
                out.disconnect(id, "Connection closed");
            }
        }
        self.flush(out);
    }

    /// Hand every queued line to its writer, then tear down every queued
    /// disconnect, until nothing is left. Teardown can queue more lines
    /// (leave notices). Once a client's queue refuses a line, its remaining
    /// lines are dropped.
    fn flush(&mut self, mut out: Outbox) {
        let mut failed = HashSet::new();
        loop {
            for delivery in out.take_deliveries() {
                if failed.contains(&delivery.to) {
                    continue;
                }
                let Some(conn) = self.connections.get(&delivery.to) else {
                    continue;
                };
                if let Err(e) = conn.send_line(&delivery.line) {
                    warn!(client = %delivery.to, error = %e, "write failed");
                    failed.insert(delivery.to);
                    out.disconnect(delivery.to, "Write error");
                }
            }

            let disconnects = out.take_disconnects();
            if disconnects.is_empty() {
                break;
            }
            for (id, reason) in disconnects {
                self.teardown(id, &reason, &mut out);
            }
        }
    }

    /// Close a connection and remove the client everywhere. Idempotent.
    fn teardown(&mut self, id: ClientId, reason: &str, out: &mut Outbox) {
        let Some(conn) = self.connections.remove(&id) else {
            return;
        };
        self.readers.remove(&id);
        let client = self.hub.disconnect(id, reason, out);
        info!(
            client = %id,
            addr = %conn.addr(),
            nick = client.as_ref().map(|c| c.nick_or_star()).unwrap_or("*"),
            reason,
            "connection closed"
        );
    }
}

/// Tell a connection refused for capacity why, then close it.
async fn refuse(mut stream: TcpStream, addr: SocketAddr) {
    if let Err(e) = stream.write_all(SERVER_FULL).await {
        debug!(%addr, error = %e, "failed to send refusal");
        return;
    }
    if let Err(e) = stream.shutdown().await {
        debug!(%addr, error = %e, "failed to shut down refused connection");
    }
}
