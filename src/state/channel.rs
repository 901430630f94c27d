//! Channel-related types and state.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use subtle::ConstantTimeEq;

use super::client::ClientId;

/// Longest accepted channel name, in characters.
const MAX_CHANNEL_NAME: usize = 50;

/// Channel topic with metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub text: String,
    pub set_by: String,
    pub set_at: DateTime<Utc>,
}

/// A named group of clients.
///
/// Membership is tracked by [`ClientId`]. The operator set is kept a subset
/// of the member set by every mutating method here.
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    password: String,
    pub topic: Option<Topic>,
    members: HashSet<ClientId>,
    operators: HashSet<ClientId>,
    /// Lowercased nicknames, no duplicates.
    bans: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    /// Create a channel whose first member and operator is `creator`.
    pub fn new(name: impl Into<String>, password: impl Into<String>, creator: ClientId) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            topic: None,
            members: HashSet::from([creator]),
            operators: HashSet::from([creator]),
            bans: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether `attempt` opens this channel. Open channels accept anything.
    pub fn check_password(&self, attempt: &str) -> bool {
        if self.password.is_empty() {
            return true;
        }
        bool::from(self.password.as_bytes().ct_eq(attempt.as_bytes()))
    }

    #[cfg(test)]
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }

    #[inline]
    pub fn is_member(&self, id: ClientId) -> bool {
        self.members.contains(&id)
    }

    #[inline]
    pub fn is_operator(&self, id: ClientId) -> bool {
        self.operators.contains(&id)
    }

    pub fn members(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.members.iter().copied()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Add a plain member. Returns false if already present.
    pub fn add_member(&mut self, id: ClientId) -> bool {
        self.members.insert(id)
    }

    /// Remove from both the member and operator sets.
    pub fn remove_member(&mut self, id: ClientId) -> bool {
        self.operators.remove(&id);
        self.members.remove(&id)
    }

    /// Grant operator status to an existing member.
    ///
    /// Returns false if `id` is not a member or already an operator.
    pub fn promote(&mut self, id: ClientId) -> bool {
        self.members.contains(&id) && self.operators.insert(id)
    }

    /// Add a nickname to the ban list.
    pub fn ban(&mut self, nick: &str) {
        let nick = nick.to_ascii_lowercase();
        if !self.bans.contains(&nick) {
            self.bans.push(nick);
        }
    }

    pub fn is_banned(&self, nick: &str) -> bool {
        self.bans.iter().any(|b| b.eq_ignore_ascii_case(nick))
    }

    #[cfg(test)]
    pub fn bans(&self) -> &[String] {
        &self.bans
    }

    pub fn set_topic(&mut self, text: impl Into<String>, set_by: impl Into<String>) {
        self.topic = Some(Topic {
            text: text.into(),
            set_by: set_by.into(),
            set_at: Utc::now(),
        });
    }

    /// Topic text, empty when unset.
    pub fn topic_text(&self) -> &str {
        self.topic.as_ref().map(|t| t.text.as_str()).unwrap_or("")
    }
}

/// Check a channel name: 1-50 chars, no whitespace, comma, colon or control
/// characters.
pub fn is_valid_channel_name(name: &str) -> bool {
    let len = name.chars().count();
    (1..=MAX_CHANNEL_NAME).contains(&len)
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == ',' || c == ':')
}
