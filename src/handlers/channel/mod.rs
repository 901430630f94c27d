//! Channel command handlers.
//!
//! CREATE, JOIN and LIST are global. LEAVE, DELETE, KICK, ADDOP, LSTMEMBERS
//! and TOPIC act on the channel the sender is in.

mod addop;
mod create;
mod delete;
mod join;
mod kick;
mod leave;
mod list;
mod members;
mod topic;

pub use addop::AddopHandler;
pub use create::CreateHandler;
pub use delete::DeleteHandler;
pub use join::JoinHandler;
pub use kick::KickHandler;
pub use leave::LeaveHandler;
pub use list::ListHandler;
pub use members::MembersHandler;
pub use topic::TopicHandler;
