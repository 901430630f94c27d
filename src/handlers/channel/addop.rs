//! ADDOP command handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Message;
use tracing::info;

/// Handler for ADDOP command.
///
/// `ADDOP <nickname>`
pub struct AddopHandler;

impl Handler for AddopHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let target = msg.arg(0).ok_or(HandlerError::Usage("ADDOP <nickname>"))?;

        ctx.hub.add_operator(ctx.id, target, ctx.out)?;
        info!(by = ctx.nick(), promoted = target, "channel operator added");
        ctx.success(&format!("{target} is now a channel operator"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::Harness;

    #[test]
    fn promoted_member_can_kick() {
        let mut h = Harness::new();
        let a = h.register("alice");
        let b = h.register("bob");
        let c = h.register("carol");
        h.send(a, "CREATE general");
        h.send(b, "JOIN general");
        h.send(c, "JOIN general");

        let out = h.send(a, "ADDOP bob");
        assert_eq!(
            out.lines_for(a),
            vec![":alice!alice@localhost SUCCESS :bob is now a channel operator"]
        );
        assert_eq!(
            out.lines_for(b),
            vec![":alice!alice@localhost NOTICE general :You are now an operator of general"]
        );

        let out = h.send(b, "KICK carol");
        assert_eq!(
            out.lines_for(b),
            vec![":bob!bob@localhost SUCCESS :carol has been kicked from general"]
        );
    }

    #[test]
    fn addop_errors() {
        let mut h = Harness::new();
        let a = h.register("alice");
        let b = h.register("bob");
        h.send(a, "CREATE general");
        h.send(b, "JOIN general");

        let out = h.send(a, "ADDOP alice");
        assert_eq!(
            out.lines_for(a),
            vec![":alice!alice@localhost ERROR :You cannot make yourself op"]
        );
        let out = h.send(b, "ADDOP bob");
        assert_eq!(
            out.lines_for(b),
            vec![":bob!bob@localhost ERROR :Permission denied: you are not a channel operator"]
        );
        h.send(a, "ADDOP bob");
        let out = h.send(a, "ADDOP bob");
        assert_eq!(
            out.lines_for(a),
            vec![":alice!alice@localhost ERROR :bob is already an operator"]
        );
    }
}
