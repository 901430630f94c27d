//! Command handler registry and dispatch.
//!
//! Two tables: channel-scoped commands and global commands. Routing for a
//! line that passes the registration gate:
//!
//! - inside a channel: channel-scoped commands and the connection-level
//!   commands in [`IN_CHANNEL_GLOBALS`] run; every other line is relayed to
//!   the channel as chat;
//! - outside a channel: global commands run, channel-scoped commands fail
//!   with "not on a channel", anything else is an unknown command.

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{
    channel::{
        AddopHandler, CreateHandler, DeleteHandler, JoinHandler, KickHandler, LeaveHandler,
        ListHandler, MembersHandler, TopicHandler,
    },
    connection::{NickHandler, PassHandler, PingHandler, QuitHandler, UserHandler},
    messaging::PrivmsgHandler,
    oper::{KillHandler, OperHandler},
};
use relay_proto::Message;
use std::collections::HashMap;
use tracing::{Level, debug, span, warn};

/// Global commands that still run while the client is in a channel.
///
/// OPER is here so credentials are never relayed to other members.
const IN_CHANNEL_GLOBALS: &[&str] = &["PING", "QUIT", "OPER"];

/// Registry of command handlers.
pub struct Registry {
    global: HashMap<&'static str, Box<dyn Handler>>,
    channel: HashMap<&'static str, Box<dyn Handler>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut global: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // Connection/registration handlers
        global.insert("PASS", Box::new(PassHandler));
        global.insert("NICK", Box::new(NickHandler));
        global.insert("USER", Box::new(UserHandler));
        global.insert("PING", Box::new(PingHandler));
        global.insert("QUIT", Box::new(QuitHandler));

        // Channel entry and discovery
        global.insert("CREATE", Box::new(CreateHandler));
        global.insert("JOIN", Box::new(JoinHandler));
        global.insert("LIST", Box::new(ListHandler));

        // Messaging
        global.insert("PRIVMSG", Box::new(PrivmsgHandler));

        // Operator handlers
        global.insert("OPER", Box::new(OperHandler));
        global.insert("KILL", Box::new(KillHandler));

        let mut channel: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();
        channel.insert("LEAVE", Box::new(LeaveHandler));
        channel.insert("DELETE", Box::new(DeleteHandler));
        channel.insert("KICK", Box::new(KickHandler));
        channel.insert("ADDOP", Box::new(AddopHandler));
        channel.insert("LSTMEMBERS", Box::new(MembersHandler));
        channel.insert("TOPIC", Box::new(TopicHandler));

        Self { global, channel }
    }

    /// Dispatch one parsed line.
    ///
    /// Failures become error replies; an auth failure also schedules the
    /// connection for teardown. Nothing here returns an error to the caller.
    pub fn dispatch(&self, ctx: &mut Context<'_>, msg: &Message) {
        let irc_span = span!(
            Level::DEBUG,
            "command",
            command = %msg.command,
            client = %ctx.id,
            nick = ctx.nick(),
        );
        let _enter = irc_span.enter();

        if let Err(e) = self.route(ctx, msg) {
            debug!(error = %e, code = e.error_code(), "command error");
            ctx.hub.error(ctx.id, &e, ctx.out);
            if e.closes_connection() {
                warn!(client = %ctx.id, "closing connection after failed authentication");
                ctx.out.disconnect(ctx.id, e.to_string());
            }
        }
    }

    fn route(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let phase = ctx.client().map(|c| c.phase).unwrap_or_default();
        phase.gate(&msg.command)?;

        let command = msg.command.as_str();
        if ctx.in_channel() {
            if let Some(handler) = self.channel.get(command) {
                return handler.handle(ctx, msg);
            }
            if IN_CHANNEL_GLOBALS.contains(&command)
                && let Some(handler) = self.global.get(command)
            {
                return handler.handle(ctx, msg);
            }
            return ctx.hub.broadcast(ctx.id, &msg.raw, ctx.out);
        }

        if self.channel.contains_key(command) {
            return Err(HandlerError::NotOnChannel);
        }
        if let Some(handler) = self.global.get(command) {
            return handler.handle(ctx, msg);
        }

        Err(HandlerError::UnknownCommand(msg.command.clone()))
    }

    /// Reply to a line that exceeded the length limit.
    pub fn overflow(&self, ctx: &mut Context<'_>) {
        ctx.hub.error(ctx.id, &HandlerError::LineTooLong, ctx.out);
    }
}
