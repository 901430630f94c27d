//! LSTMEMBERS command handler.

use super::super::{Context, Handler};
use crate::error::HandlerResult;
use relay_proto::Message;

/// Handler for LSTMEMBERS command.
///
/// Replies `MEMBERS <channel> :<nick> ...`, operators prefixed with `@`.
pub struct MembersHandler;

impl Handler for MembersHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        let (channel, members) = ctx.hub.list_members(ctx.id)?;
        ctx.reply(&format!("MEMBERS {channel} :{}", members.join(" ")));
        Ok(())
    }
}
