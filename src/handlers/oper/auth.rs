//! OPER command handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Message;
use tracing::{info, warn};

/// Handler for OPER command.
///
/// `OPER <name> <password>`
///
/// Authenticates a user as a server operator.
pub struct OperHandler;

impl Handler for OperHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let (Some(name), Some(password)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::Usage("OPER <name> <password>"));
        };

        if !ctx.hub.find_oper(name, password) {
            warn!(client = %ctx.id, nick = ctx.nick(), oper = name, "failed OPER attempt");
            return Err(HandlerError::OperCredentials);
        }

        if let Some(client) = ctx.client_mut() {
            client.server_operator = true;
        }
        info!(client = %ctx.id, nick = ctx.nick(), oper = name, "server operator granted");
        ctx.success("You are now a server operator");
        Ok(())
    }
}
