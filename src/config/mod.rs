//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig) and CLI overrides
//! - [`listen`]: Listener address configuration (ListenConfig)
//! - [`limits`]: Connection and framing limits (LimitsConfig)
//! - [`oper`]: Server operator blocks (OperBlock)
//! - [`validation`]: Startup checks that run after loading

mod limits;
mod listen;
mod oper;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use oper::OperBlock;
pub use types::{Config, ConfigError, ServerConfig, parse_port};
pub use validation::{ValidationError, validate};
