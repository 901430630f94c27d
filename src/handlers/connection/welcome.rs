//! Welcome burst sent on registration completion.

use super::super::Context;

/// Send 001-003 to a newly registered client.
pub fn send_welcome_burst(ctx: &mut Context<'_>) {
    let server = ctx.hub.server_name().to_string();
    let created = ctx.hub.created_at().to_rfc2822();
    let nick = ctx.nick().to_string();
    let mask = ctx
        .client()
        .and_then(|c| c.mask())
        .unwrap_or_else(|| nick.clone());

    let lines = [
        format!(":{server} 001 {nick} :Welcome to the Internet Relay Network {mask}"),
        format!(
            ":{server} 002 {nick} :Your host is {server}, running version relayd-{}",
            env!("CARGO_PKG_VERSION")
        ),
        format!(":{server} 003 {nick} :This server was created {created}"),
    ];
    for line in lines {
        ctx.out.send(ctx.id, line);
    }
}
