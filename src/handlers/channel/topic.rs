//! TOPIC command handler.

use super::super::{Context, Handler};
use crate::error::HandlerResult;
use relay_proto::Message;
use tracing::info;

/// Handler for TOPIC command.
///
/// `TOPIC` shows the topic. `TOPIC <text>` sets it (channel operators only).
pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        match msg.text_from(0) {
            None => {
                let (channel, topic) = ctx.hub.topic(ctx.id)?;
                if topic.is_empty() {
                    ctx.success(&format!("No topic is set for {channel}"));
                } else {
                    ctx.reply(&format!("TOPIC {channel} :{topic}"));
                }
            }
            Some(text) => {
                let channel = ctx.hub.set_topic(ctx.id, &text, ctx.out)?;
                info!(channel = %channel, by = ctx.nick(), "topic changed");
                ctx.success(&format!("Topic for {channel} set"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::Harness;

    #[test]
    fn topic_lifecycle() {
        let mut h = Harness::new();
        let a = h.register("alice");
        let b = h.register("bob");
        h.send(a, "CREATE general");
        h.send(b, "JOIN general");

        let out = h.send(b, "TOPIC");
        assert_eq!(
            out.lines_for(b),
            vec![":bob!bob@localhost SUCCESS :No topic is set for general"]
        );

        let out = h.send(a, "TOPIC :Weekly sync notes");
        assert_eq!(
            out.lines_for(a),
            vec![":alice!alice@localhost SUCCESS :Topic for general set"]
        );
        assert_eq!(
            out.lines_for(b),
            vec![":alice!alice@localhost TOPIC general :Weekly sync notes"]
        );

        let out = h.send(b, "TOPIC");
        assert_eq!(
            out.lines_for(b),
            vec![":bob!bob@localhost TOPIC general :Weekly sync notes"]
        );
    }

    #[test]
    fn non_operator_cannot_set_topic() {
        let mut h = Harness::new();
        let a = h.register("alice");
        let b = h.register("bob");
        h.send(a, "CREATE general");
        h.send(b, "JOIN general");

        let out = h.send(b, "TOPIC hijacked");
        assert_eq!(
            out.lines_for(b),
            vec![":bob!bob@localhost ERROR :Permission denied: you are not a channel operator"]
        );
        assert!(out.lines_for(a).is_empty());
    }
}
