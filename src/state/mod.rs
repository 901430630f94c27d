//! State management module.
//!
//! Contains the Hub (all server state) and the entities it owns.

mod channel;
mod client;
mod hub;
mod machine;
mod outbox;
mod registry;

pub use channel::{Channel, Topic};
pub use client::{Client, ClientId, UserInfo};
pub use hub::{ChannelSummary, Hub};
pub use machine::Phase;
pub use outbox::Outbox;
pub use registry::ChannelRegistry;

#[cfg(test)]
pub(crate) use hub::tests as testing;
