//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces")]
    ServerNameHasSpace,
    #[error("connection password must not be empty")]
    EmptyPassword,
    #[error("limits.{0} must be greater than zero")]
    ZeroLimit(&'static str),
    #[error("oper block {0:?} has an empty name or password")]
    IncompleteOper(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if config.server.name.contains(char::is_whitespace) {
        errors.push(ValidationError::ServerNameHasSpace);
    }
    if config.server.password.is_empty() {
        errors.push(ValidationError::EmptyPassword);
    }

    let limits = &config.limits;
    for (name, value) in [
        ("max_clients", limits.max_clients),
        ("read_buffer_size", limits.read_buffer_size),
        ("max_line_length", limits.max_line_length),
        ("send_queue", limits.send_queue),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroLimit(name));
        }
    }

    for oper in &config.oper {
        if oper.name.is_empty() || oper.password.is_empty() {
            errors.push(ValidationError::IncompleteOper(oper.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
