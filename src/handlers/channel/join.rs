//! JOIN command handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Message;
use tracing::info;

/// Handler for JOIN command.
///
/// `JOIN <channel> [password]`
pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let name = msg
            .arg(0)
            .ok_or(HandlerError::Usage("JOIN <channel> [password]"))?;
        let password = msg.arg(1).unwrap_or("");

        ctx.hub.join_channel(ctx.id, name, password, ctx.out)?;
        info!(client = %ctx.id, nick = ctx.nick(), channel = name, "joined channel");
        ctx.success(&format!("You have joined the channel {name}"));

        let (_, topic) = ctx.hub.topic(ctx.id)?;
        if !topic.is_empty() {
            ctx.reply(&format!("TOPIC {name} :{topic}"));
        }
        Ok(())
    }
}
