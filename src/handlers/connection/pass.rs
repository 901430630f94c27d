//! PASS command handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Message;
use tracing::{info, warn};

/// Handler for PASS command.
///
/// `PASS <password>`
pub struct PassHandler;

impl Handler for PassHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let password = msg.arg(0).ok_or(HandlerError::Usage("PASS <password>"))?;

        let phase = ctx.client().map(|c| c.phase).unwrap_or_default();
        if phase.is_authenticated() {
            return Err(HandlerError::AlreadyAuthenticated);
        }

        if !ctx.hub.check_password(password) {
            warn!(client = %ctx.id, "wrong connection password");
            return Err(HandlerError::PasswordMismatch);
        }

        let next = phase.authenticate()?;
        if let Some(client) = ctx.client_mut() {
            client.phase = next;
        }
        info!(client = %ctx.id, "client authenticated");
        ctx.success("Password accepted");
        Ok(())
    }
}
