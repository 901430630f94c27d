//! CREATE command handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Message;

/// Handler for CREATE command.
///
/// `CREATE <channel> [password]`
///
/// The creator becomes the first member and operator. No password means an
/// open channel.
pub struct CreateHandler;

impl Handler for CreateHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let name = msg
            .arg(0)
            .ok_or(HandlerError::Usage("CREATE <channel> [password]"))?;
        let password = msg.arg(1).unwrap_or("");

        ctx.hub.create_channel(ctx.id, name, password)?;
        ctx.success(&format!("Channel {name} created"));
        Ok(())
    }
}
