//! Pending output produced while handling one line.
//!
//! State code never touches sockets. It records what should be written and
//! who should be dropped, and the gateway drains the outbox once the line
//! has been processed.

use super::client::ClientId;

/// One line addressed to one client, terminator not included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub to: ClientId,
    pub line: String,
}

/// Deliveries and disconnects queued during dispatch.
#[derive(Debug, Default)]
pub struct Outbox {
    deliveries: Vec<Delivery>,
    disconnects: Vec<(ClientId, String)>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `line` for `to`.
    pub fn send(&mut self, to: ClientId, line: impl Into<String>) {
        self.deliveries.push(Delivery {
            to,
            line: line.into(),
        });
    }

    /// Queue `line` for every id in `to` except `except`.
    pub fn send_many<I>(&mut self, to: I, except: Option<ClientId>, line: &str)
    where
        I: IntoIterator<Item = ClientId>,
    {
        for id in to {
            if Some(id) != except {
                self.send(id, line);
            }
        }
    }

    /// Schedule teardown of `id` after pending deliveries are written.
    pub fn disconnect(&mut self, id: ClientId, reason: impl Into<String>) {
        if !self.disconnects.iter().any(|(d, _)| *d == id) {
            self.disconnects.push((id, reason.into()));
        }
    }

    pub fn take_deliveries(&mut self) -> Vec<Delivery> {
        std::mem::take(&mut self.deliveries)
    }

    pub fn take_disconnects(&mut self) -> Vec<(ClientId, String)> {
        std::mem::take(&mut self.disconnects)
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty() && self.disconnects.is_empty()
    }

    /// Lines queued for `id`, in order.
    pub fn lines_for(&self, id: ClientId) -> Vec<&str> {
        self.deliveries
            .iter()
            .filter(|d| d.to == id)
            .map(|d| d.line.as_str())
            .collect()
    }

    pub fn is_disconnecting(&self, id: ClientId) -> bool {
        self.disconnects.iter().any(|(d, _)| *d == id)
    }
}
