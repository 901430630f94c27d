//! Connection and registration handlers.
//!
//! Handles PASS, NICK, USER, PING, QUIT commands.

mod nick;
mod pass;
mod ping;
mod quit;
mod user;
mod welcome;

pub use nick::NickHandler;
pub use pass::PassHandler;
pub use ping::PingHandler;
pub use quit::QuitHandler;
pub use user::UserHandler;
