//! KICK command handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Message;

/// Handler for KICK command.
///
/// `KICK <nickname>`
///
/// Removes a member from the sender's channel and bans the nickname from it.
pub struct KickHandler;

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let target = msg.arg(0).ok_or(HandlerError::Usage("KICK <nickname>"))?;
        let channel = ctx.hub.current_channel(ctx.id)?;

        ctx.hub.kick(ctx.id, target, ctx.out)?;
        ctx.success(&format!("{target} has been kicked from {channel}"));
        Ok(())
    }
}
