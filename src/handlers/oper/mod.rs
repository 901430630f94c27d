//! Server operator handlers.
//!
//! OPER grants the global operator flag; KILL is its only privilege.

mod auth;
mod kill;

pub use auth::OperHandler;
pub use kill::KillHandler;
