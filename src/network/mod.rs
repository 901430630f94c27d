//! Network module.
//!
//! Contains the Gateway (listener and event loop) and the per-client
//! Connection write side.

mod connection;
mod gateway;

pub use connection::{Connection, SendError};
pub use gateway::Gateway;
