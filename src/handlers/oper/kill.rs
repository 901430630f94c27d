//! KILL command handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Message;
use tracing::info;

/// Handler for KILL command.
///
/// `KILL <nickname> [reason]`
///
/// Disconnects a user from the server. Requires server operator privileges.
pub struct KillHandler;

impl Handler for KillHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let target_nick = msg
            .arg(0)
            .ok_or(HandlerError::Usage("KILL <nickname> [reason]"))?;
        let reason = msg
            .text_from(1)
            .unwrap_or_else(|| "No reason given".to_string());

        if !ctx.client().is_some_and(|c| c.server_operator) {
            return Err(HandlerError::NoPrivileges);
        }

        let target = ctx
            .hub
            .nick_owner(target_nick)
            .ok_or_else(|| HandlerError::NoSuchNick(target_nick.to_string()))?;
        let killer = ctx.nick().to_string();
        let victim = ctx.hub.nick_of(target).to_string();

        ctx.out
            .send(target, format!("ERROR :Killed by {killer} ({reason})"));
        ctx.out.disconnect(target, format!("Killed by {killer} ({reason})"));
        info!(killer = %killer, victim = %victim, reason = %reason, "client killed");

        if target != ctx.id {
            ctx.success(&format!("{victim} has been killed"));
        }
        Ok(())
    }
}
