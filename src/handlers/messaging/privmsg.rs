//! PRIVMSG command handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Message;
use tracing::debug;

/// Handler for PRIVMSG command.
///
/// `PRIVMSG <target> <text...>`
///
/// The target is a nickname. Inside a channel this line is relayed as chat
/// before it reaches here.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let (Some(target), Some(text)) = (msg.arg(0), msg.text_from(1)) else {
            return Err(HandlerError::Usage("PRIVMSG <target> <text>"));
        };

        let recipient = ctx
            .hub
            .nick_owner(target)
            .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
        let recipient_nick = ctx.hub.nick_of(recipient).to_string();
        let line = format!(
            "{}PRIVMSG {recipient_nick} :{text}",
            ctx.hub.reply_prefix(ctx.id)
        );
        ctx.out.send(recipient, line);
        debug!(from = ctx.nick(), to = %recipient_nick, "private message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::Harness;

    #[test]
    fn private_message_reaches_only_target() {
        let mut h = Harness::new();
        let a = h.register("alice");
        let b = h.register("bob");
        let c = h.register("carol");

        let out = h.send(a, "PRIVMSG BOB :hi there");
        assert_eq!(
            out.lines_for(b),
            vec![":alice!alice@localhost PRIVMSG bob :hi there"]
        );
        assert!(out.lines_for(a).is_empty());
        assert!(out.lines_for(c).is_empty());
    }

    #[test]
    fn loose_words_are_joined() {
        let mut h = Harness::new();
        let a = h.register("alice");
        let b = h.register("bob");
        let out = h.send(a, "PRIVMSG bob see you later");
        assert_eq!(
            out.lines_for(b),
            vec![":alice!alice@localhost PRIVMSG bob :see you later"]
        );
    }

    #[test]
    fn unknown_target() {
        let mut h = Harness::new();
        let a = h.register("alice");
        let out = h.send(a, "PRIVMSG ghost :boo");
        assert_eq!(
            out.lines_for(a),
            vec![":alice!alice@localhost ERROR :No such nick ghost"]
        );
        let out = h.send(a, "PRIVMSG ghost");
        assert_eq!(
            out.lines_for(a),
            vec![":alice!alice@localhost ERROR :Usage: PRIVMSG <target> <text>"]
        );
    }

    #[test]
    fn channel_member_can_be_messaged_from_outside() {
        let mut h = Harness::new();
        let a = h.register("alice");
        let b = h.register("bob");
        h.send(b, "CREATE general");

        let out = h.send(a, "PRIVMSG bob :are you around?");
        assert_eq!(
            out.lines_for(b),
            vec![":alice!alice@localhost PRIVMSG bob :are you around?"]
        );
    }
}
