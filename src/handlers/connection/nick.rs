//! NICK command handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Message;
use tracing::info;

/// Longest accepted nickname.
const MAX_NICK_LEN: usize = 30;

/// Validates a nickname.
/// First char: letter or special [\]^_`{|}
/// Rest: letter, digit, special, or hyphen
fn is_valid_nick(nick: &str) -> bool {
    if nick.is_empty() || nick.len() > MAX_NICK_LEN {
        return false;
    }

    let is_special = |c: char| matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}');

    let mut chars = nick.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    // First char: letter or special
    if !first.is_ascii_alphabetic() && !is_special(first) {
        return false;
    }

    // Rest: letter, digit, special, or hyphen
    chars.all(|c| c.is_ascii_alphanumeric() || is_special(c) || c == '-')
}

/// Handler for NICK command.
///
/// `NICK <nickname>`
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let nick = msg.arg(0).ok_or(HandlerError::Usage("NICK <nickname>"))?;

        if !is_valid_nick(nick) {
            return Err(HandlerError::ErroneousNickname(nick.to_string()));
        }

        let old = ctx.hub.set_nick(ctx.id, nick)?;
        if let Some(client) = ctx.client_mut() {
            client.phase = client.phase.named();
        }

        if let Some(old) = &old
            && old != nick
        {
            info!(client = %ctx.id, old = %old, new = %nick, "nick changed");
        }

        ctx.success(&format!("Nickname set to {nick}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::Harness;
    use crate::state::Phase;

    #[test]
    fn test_is_valid_nick() {
        assert!(is_valid_nick("alice"));
        assert!(is_valid_nick("[bot]"));
        assert!(is_valid_nick("a-b_c9"));
        assert!(!is_valid_nick(""));
        assert!(!is_valid_nick("9lives"));
        assert!(!is_valid_nick("has space"));
        assert!(!is_valid_nick("#chan"));
        assert!(!is_valid_nick(&"n".repeat(31)));
    }

    #[test]
    fn nick_moves_to_named() {
        let mut h = Harness::new();
        let id = h.connect();
        h.send(id, "PASS secret");
        let out = h.send(id, "NICK alice");
        assert_eq!(out.lines_for(id), vec![":irc.test SUCCESS :Nickname set to alice"]);
        assert_eq!(h.hub.client(id).unwrap().phase, Phase::Named);
    }

    #[test]
    fn duplicate_nick_is_rejected() {
        let mut h = Harness::new();
        let _a = h.register("alice");
        let b = h.connect();
        h.send(b, "PASS secret");

        let out = h.send(b, "NICK Alice");
        assert_eq!(
            out.lines_for(b),
            vec![":irc.test ERROR :Nickname Alice is already in use"]
        );
        let client = h.hub.client(b).unwrap();
        assert_eq!(client.nick, None);
        assert_eq!(client.phase, Phase::Authenticated);
    }

    #[test]
    fn erroneous_nick() {
        let mut h = Harness::new();
        let id = h.connect();
        h.send(id, "PASS secret");
        let out = h.send(id, "NICK 1abc");
        assert_eq!(out.lines_for(id), vec![":irc.test ERROR :Erroneous nickname 1abc"]);
    }

    #[test]
    fn rename_while_registered_keeps_phase() {
        let mut h = Harness::new();
        let _a = h.register("alice");
        let b = h.register("bob");

        let out = h.send(b, "NICK robert");
        assert_eq!(
            out.lines_for(b),
            vec![":robert!bob@localhost SUCCESS :Nickname set to robert"]
        );
        assert_eq!(out.deliveries().len(), 1);
        assert_eq!(h.hub.client(b).unwrap().phase, Phase::Registered);
        assert_eq!(h.hub.nick_owner("bob"), None);
        assert_eq!(h.hub.nick_owner("ROBERT"), Some(b));
    }
}
