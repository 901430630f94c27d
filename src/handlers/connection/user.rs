//! USER command handler.

use super::super::{Context, Handler};
use super::welcome::send_welcome_burst;
use crate::error::{HandlerError, HandlerResult};
use crate::state::UserInfo;
use relay_proto::Message;
use tracing::info;

const USAGE: &str = "USER <username> <hostname> <servername> <realname>";

/// Handler for USER command.
///
/// `USER <username> <hostname> <servername> <realname>`
///
/// The realname may be a trailing parameter or the remaining words.
pub struct UserHandler;

impl Handler for UserHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let phase = ctx.client().map(|c| c.phase).unwrap_or_default();
        if phase.is_registered() {
            return Err(HandlerError::AlreadyRegistered);
        }

        let (Some(username), Some(hostname), Some(servername), Some(realname)) = (
            msg.arg(0),
            msg.arg(1),
            msg.arg(2),
            msg.text_from(3),
        ) else {
            return Err(HandlerError::Usage(USAGE));
        };

        let next = phase.register()?;
        let info = UserInfo {
            username: username.to_string(),
            hostname: hostname.to_string(),
            servername: servername.to_string(),
            realname,
        };
        if let Some(client) = ctx.client_mut() {
            client.user = Some(info);
            client.phase = next;
        }

        info!(client = %ctx.id, nick = ctx.nick(), user = username, "client registered");
        ctx.success("User registered");
        send_welcome_burst(ctx);
        Ok(())
    }
}
