//! DELETE command handler.

use super::super::{Context, Handler};
use crate::error::HandlerResult;
use relay_proto::Message;

/// Handler for DELETE command.
///
/// Channel operators only. Every member is forced out.
pub struct DeleteHandler;

impl Handler for DeleteHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        let name = ctx.hub.delete_channel(ctx.id, ctx.out)?;
        ctx.success(&format!("Channel {name} deleted"));
        Ok(())
    }
}
