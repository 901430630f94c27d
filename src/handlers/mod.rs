//! Command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! parsed lines to the appropriate handlers. Handlers mutate the Hub and queue
//! their replies in the outbox held by the [`Context`].

mod channel;
mod connection;
mod core;
mod messaging;
mod oper;

pub use self::core::{Context, Handler, Registry};
