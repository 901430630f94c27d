//! QUIT handler.

use super::super::{Context, Handler};
use crate::error::HandlerResult;
use relay_proto::Message;
use tracing::info;

/// Handler for QUIT command.
///
/// `QUIT [reason]`
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let reason = msg.text_from(0).unwrap_or_else(|| "Client quit".to_string());

        info!(client = %ctx.id, nick = ctx.nick(), reason = %reason, "client quit");

        ctx.out.send(ctx.id, "ERROR :Closing link");
        ctx.out.disconnect(ctx.id, reason);
        Ok(())
    }
}
