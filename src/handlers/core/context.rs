//! Command handler context and core types.
//!
//! Defines the `Handler` trait and the `Context` passed to every handler.
//! A context borrows the Hub and the outbox for the duration of one line.

use crate::error::HandlerResult;
use crate::state::{Client, ClientId, Hub, Outbox};
use relay_proto::Message;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The client that sent the line.
    pub id: ClientId,
    /// All server state.
    pub hub: &'a mut Hub,
    /// Output collected while handling this line.
    pub out: &'a mut Outbox,
}

impl<'a> Context<'a> {
    pub fn new(id: ClientId, hub: &'a mut Hub, out: &'a mut Outbox) -> Self {
        Self { id, hub, out }
    }

    /// The sending client.
    pub fn client(&self) -> Option<&Client> {
        self.hub.client(self.id)
    }

    pub fn client_mut(&mut self) -> Option<&mut Client> {
        self.hub.client_mut(self.id)
    }

    /// Nickname of the sender, or "*".
    pub fn nick(&self) -> &str {
        self.hub.nick_of(self.id)
    }

    /// Whether the sender is currently in a channel.
    pub fn in_channel(&self) -> bool {
        self.client().is_some_and(|c| c.channel.is_some())
    }

    /// Queue `{prefix}{body}` for the sender.
    pub fn reply(&mut self, body: &str) {
        let line = format!("{}{body}", self.hub.reply_prefix(self.id));
        self.out.send(self.id, line);
    }

    /// Queue `{prefix}SUCCESS :{text}` for the sender.
    pub fn success(&mut self, text: &str) {
        self.hub.success(self.id, text, self.out);
    }
}

/// Command handler trait.
///
/// Handlers run synchronously on the event loop and must not block. Errors
/// are turned into replies by the registry.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult;
}
