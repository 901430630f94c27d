//! LEAVE command handler.

use super::super::{Context, Handler};
use crate::error::HandlerResult;
use relay_proto::Message;
use tracing::info;

/// Handler for LEAVE command.
pub struct LeaveHandler;

impl Handler for LeaveHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        let name = ctx.hub.leave_channel(ctx.id, ctx.out)?;
        info!(client = %ctx.id, nick = ctx.nick(), channel = %name, "left channel");
        ctx.success(&format!("You have left the channel {name}"));
        Ok(())
    }
}
