//! LIST command handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use relay_proto::Message;

/// Handler for LIST command.
///
/// `LIST [channel]`
///
/// One `LIST <name> <members> :<topic>` line per channel, sorted by name,
/// then `LISTEND`.
pub struct ListHandler;

impl Handler for ListHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let filter = msg.arg(0);

        let rows: Vec<_> = ctx
            .hub
            .list_channels()
            .into_iter()
            .filter(|row| filter.is_none_or(|f| row.name.eq_ignore_ascii_case(f)))
            .collect();
        if rows.is_empty() {
            return Err(HandlerError::NoChannels);
        }

        for row in rows {
            ctx.reply(&format!("LIST {} {} :{}", row.name, row.members, row.topic));
        }
        ctx.reply("LISTEND :End of channel list");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::Harness;

    #[test]
    fn empty_list() {
        let mut h = Harness::new();
        let a = h.register("alice");
        let out = h.send(a, "LIST");
        assert_eq!(
            out.lines_for(a),
            vec![":alice!alice@localhost ERROR :No available channels"]
        );
    }

    #[test]
    fn list_is_sorted_with_counts() {
        let mut h = Harness::new();
        let a = h.register("alice");
        let b = h.register("bob");
        let c = h.register("carol");
        h.send(a, "CREATE zeta");
        h.send(a, "TOPIC :last one");
        h.send(b, "JOIN zeta");
        h.send(c, "CREATE alpha");
        h.send(c, "LEAVE");

        let out = h.send(c, "LIST");
        assert_eq!(
            out.lines_for(c),
            vec![
                ":carol!carol@localhost LIST alpha 0 :",
                ":carol!carol@localhost LIST zeta 2 :last one",
                ":carol!carol@localhost LISTEND :End of channel list",
            ]
        );

        let out = h.send(c, "LIST ZETA");
        assert_eq!(out.lines_for(c).len(), 2);
    }
}
