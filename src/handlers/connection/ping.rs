//! PING handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Message;

/// Handler for PING command.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // PING <token>
        let token = msg.arg(0).ok_or(HandlerError::Usage("PING <token>"))?;
        ctx.reply(&format!("PONG :{token}"));
        Ok(())
    }
}
