//! relayd - a single-threaded relay server for a small IRC-like protocol.
//!
//! Clients authenticate with a shared password, pick a nickname, register,
//! then chat one-to-one or inside password-protected channels moderated by
//! channel operators.
//!
//! The crate is organised bottom-up:
//!
//! - [`config`]: TOML file plus command-line overrides
//! - [`state`]: the Hub, clients, channels and the outbox
//! - [`handlers`]: one handler per command and the routing registry
//! - [`network`]: the event loop over the listener and every client socket

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;
