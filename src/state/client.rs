//! Per-connection client state.

use chrono::{DateTime, Utc};
use std::fmt;
use std::net::SocketAddr;

use super::machine::Phase;

/// Stable handle for one connection. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity fields supplied by USER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
    pub hostname: String,
    pub servername: String,
    pub realname: String,
}

/// A connected client.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: ClientId,
    pub addr: SocketAddr,
    pub phase: Phase,
    pub nick: Option<String>,
    pub user: Option<UserInfo>,
    /// Global operator, granted by OPER. Unrelated to channel operator status.
    pub server_operator: bool,
    /// The channel this client is a member of.
    pub channel: Option<String>,
    pub connected_at: DateTime<Utc>,
}

impl Client {
    pub fn new(id: ClientId, addr: SocketAddr) -> Self {
        Self {
            id,
            addr,
            phase: Phase::default(),
            nick: None,
            user: None,
            server_operator: false,
            channel: None,
            connected_at: Utc::now(),
        }
    }

    /// Get the nick or "*" for messages about an unnamed client.
    pub fn nick_or_star(&self) -> &str {
        self.nick.as_deref().unwrap_or("*")
    }

    /// `nick!username@hostname`, once registered.
    pub fn mask(&self) -> Option<String> {
        let nick = self.nick.as_deref()?;
        let user = self.user.as_ref()?;
        Some(format!("{nick}!{}@{}", user.username, user.hostname))
    }

    /// Reply prefix (`:mask `), once registered.
    pub fn prefix(&self) -> Option<String> {
        self.mask().map(|mask| format!(":{mask} "))
    }
}
