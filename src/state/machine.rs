//! Registration state machine for the connection lifecycle.
//!
//! ## State Machine
//!
//! ```text
//! ┌─────────────────┐  PASS  ┌───────────────┐  NICK  ┌───────┐  USER  ┌────────────┐
//! │ Unauthenticated ├───────►│ Authenticated ├───────►│ Named ├───────►│ Registered │
//! └─────────────────┘        └───────────────┘        └───────┘        └────────────┘
//! ```
//!
//! Each phase admits a fixed set of commands. Anything else is refused with
//! the error for the first missing step, and the phase does not move.

use crate::error::HandlerError;

/// Registration progress of one connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Connected, connection password not yet given.
    #[default]
    Unauthenticated,
    /// PASS accepted.
    Authenticated,
    /// NICK accepted.
    Named,
    /// USER accepted. Terminal.
    Registered,
}

impl Phase {
    /// Check whether `command` may run in this phase.
    ///
    /// `command` must already be upper-cased.
    pub fn gate(self, command: &str) -> Result<(), HandlerError> {
        match self {
            Phase::Unauthenticated if command != "PASS" => Err(HandlerError::NotAuthenticated),
            Phase::Authenticated if !matches!(command, "PASS" | "NICK") => {
                Err(HandlerError::NoNickname)
            }
            Phase::Named if !matches!(command, "PASS" | "NICK" | "USER") => {
                Err(HandlerError::NotRegistered)
            }
            _ => Ok(()),
        }
    }

    /// PASS with the right password.
    pub fn authenticate(self) -> Result<Phase, HandlerError> {
        match self {
            Phase::Unauthenticated => Ok(Phase::Authenticated),
            _ => Err(HandlerError::AlreadyAuthenticated),
        }
    }

    /// NICK accepted. Later phases keep their place on a nickname change.
    pub fn named(self) -> Phase {
        match self {
            Phase::Authenticated => Phase::Named,
            other => other,
        }
    }

    /// USER accepted.
    pub fn register(self) -> Result<Phase, HandlerError> {
        match self {
            Phase::Named => Ok(Phase::Registered),
            Phase::Registered => Err(HandlerError::AlreadyRegistered),
            Phase::Unauthenticated => Err(HandlerError::NotAuthenticated),
            Phase::Authenticated => Err(HandlerError::NoNickname),
        }
    }

    #[inline]
    pub fn is_authenticated(self) -> bool {
        self >= Phase::Authenticated
    }

    #[inline]
    pub fn is_registered(self) -> bool {
        self == Phase::Registered
    }
}
