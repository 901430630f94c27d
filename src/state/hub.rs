//! The Hub: all server state, owned by the event loop.
//!
//! `Hub` holds the client table, the nickname index and the channel
//! registry. Everything is accessed through `&mut self` from the single loop
//! task, so there is no interior locking. Methods that affect other clients
//! record their output in an [`Outbox`] instead of writing to sockets.

mod channels;

pub use channels::ChannelSummary;

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::net::SocketAddr;
use subtle::ConstantTimeEq;
use tracing::debug;

use super::client::{Client, ClientId};
use super::outbox::Outbox;
use super::registry::ChannelRegistry;
use crate::config::{Config, OperBlock};
use crate::error::HandlerError;

/// Central shared state.
#[derive(Debug)]
pub struct Hub {
    server_name: String,
    password: String,
    opers: Vec<OperBlock>,
    clients: HashMap<ClientId, Client>,
    /// Lowercased nickname to owner.
    nicks: HashMap<String, ClientId>,
    channels: ChannelRegistry,
    next_id: u64,
    created_at: DateTime<Utc>,
}

impl Hub {
    pub fn new(config: &Config) -> Self {
        Self {
            server_name: config.server.name.clone(),
            password: config.server.password.clone(),
            opers: config.oper.clone(),
            clients: HashMap::new(),
            nicks: HashMap::new(),
            channels: ChannelRegistry::new(),
            next_id: 1,
            created_at: Utc::now(),
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    /// Register a freshly accepted connection.
    pub fn connect(&mut self, addr: SocketAddr) -> ClientId {
        let id = ClientId(self.next_id);
        self.next_id += 1;
        self.clients.insert(id, Client::new(id, addr));
        debug!(client = %id, %addr, "client added");
        id
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn client_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Owner of `nick`, compared ASCII case-insensitively.
    pub fn nick_owner(&self, nick: &str) -> Option<ClientId> {
        self.nicks.get(&nick.to_ascii_lowercase()).copied()
    }

    /// Nickname of `id`, or "*".
    pub fn nick_of(&self, id: ClientId) -> &str {
        self.clients.get(&id).map(Client::nick_or_star).unwrap_or("*")
    }

    /// Assign `nick` to `id`, returning the previous nickname.
    ///
    /// A client may change the case of its own nickname.
    pub fn set_nick(&mut self, id: ClientId, nick: &str) -> Result<Option<String>, HandlerError> {
        let key = nick.to_ascii_lowercase();
        if let Some(owner) = self.nicks.get(&key)
            && *owner != id
        {
            return Err(HandlerError::NicknameInUse(nick.to_string()));
        }

        let client = self
            .clients
            .get_mut(&id)
            .ok_or_else(|| HandlerError::NoSuchNick(nick.to_string()))?;
        let old = client.nick.replace(nick.to_string());
        if let Some(old) = &old {
            self.nicks.remove(&old.to_ascii_lowercase());
        }
        self.nicks.insert(key, id);
        Ok(old)
    }

    /// `:nick!user@host ` once registered, `:servername ` before.
    pub fn reply_prefix(&self, id: ClientId) -> String {
        self.clients
            .get(&id)
            .and_then(Client::prefix)
            .unwrap_or_else(|| format!(":{} ", self.server_name))
    }

    /// Queue `{prefix}SUCCESS :{text}` for `id`.
    pub fn success(&self, id: ClientId, text: &str, out: &mut Outbox) {
        out.send(id, format!("{}SUCCESS :{text}", self.reply_prefix(id)));
    }

    /// Queue the error reply for `err` to `id`.
    pub fn error(&self, id: ClientId, err: &HandlerError, out: &mut Outbox) {
        out.send(id, err.to_reply(&self.reply_prefix(id)));
    }

    /// Compare against the connection password in constant time.
    pub fn check_password(&self, attempt: &str) -> bool {
        bool::from(self.password.as_bytes().ct_eq(attempt.as_bytes()))
    }

    /// Whether `name`/`password` match a configured operator block.
    pub fn find_oper(&self, name: &str, password: &str) -> bool {
        self.opers
            .iter()
            .any(|block| block.name == name && block.verify_password(password))
    }

    /// Remove a client entirely.
    ///
    /// If it was in a channel the remaining members get a quit notice. Returns
    /// the removed client, or None if it was already gone.
    pub fn disconnect(&mut self, id: ClientId, reason: &str, out: &mut Outbox) -> Option<Client> {
        if self.clients.get(&id)?.channel.is_some() {
            let nick = self.nick_of(id).to_string();
            self.part(id, &format!("{nick} has quit ({reason})"), out);
        }

        let client = self.clients.remove(&id)?;
        if let Some(nick) = &client.nick {
            self.nicks.remove(&nick.to_ascii_lowercase());
        }
        debug!(client = %id, nick = client.nick_or_star(), reason, "client removed");
        Some(client)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::state::{Phase, UserInfo};

    pub(crate) fn hub() -> Hub {
        let mut config = Config::default();
        config.server.name = "irc.test".into();
        config.server.password = "secret".into();
        config.oper.push(OperBlock {
            name: "root".into(),
            password: "toor".into(),
        });
        Hub::new(&config)
    }

    /// Add a fully registered client named `nick`.
    pub(crate) fn registered(hub: &mut Hub, nick: &str) -> ClientId {
        let id = hub.connect("127.0.0.1:4000".parse().unwrap());
        hub.set_nick(id, nick).unwrap();
        let client = hub.client_mut(id).unwrap();
        client.user = Some(UserInfo {
            username: nick.into(),
            hostname: "localhost".into(),
            servername: "irc.test".into(),
            realname: nick.to_uppercase(),
        });
        client.phase = Phase::Registered;
        id
    }

    #[test]
    fn ids_are_never_reused() {
        let mut hub = hub();
        let a = hub.connect("127.0.0.1:1".parse().unwrap());
        hub.disconnect(a, "bye", &mut Outbox::new());
        let b = hub.connect("127.0.0.1:2".parse().unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn nick_uniqueness_is_case_insensitive() {
        let mut hub = hub();
        let a = registered(&mut hub, "alice");
        let b = registered(&mut hub, "bob");

        assert_eq!(
            hub.set_nick(b, "ALICE"),
            Err(HandlerError::NicknameInUse("ALICE".into()))
        );
        assert_eq!(hub.nick_owner("Alice"), Some(a));
        assert_eq!(hub.nick_of(b), "bob");
    }

    #[test]
    fn nick_change_frees_old_name() {
        let mut hub = hub();
        let a = registered(&mut hub, "alice");
        assert_eq!(hub.set_nick(a, "alicia"), Ok(Some("alice".into())));
        assert_eq!(hub.nick_owner("alice"), None);
        assert_eq!(hub.nick_owner("alicia"), Some(a));

        // Own nick, different case.
        assert!(hub.set_nick(a, "Alicia").is_ok());
        assert_eq!(hub.nick_of(a), "Alicia");
    }

    #[test]
    fn disconnect_frees_nick() {
        let mut hub = hub();
        let a = registered(&mut hub, "alice");
        assert!(hub.disconnect(a, "bye", &mut Outbox::new()).is_some());
        assert!(hub.disconnect(a, "bye", &mut Outbox::new()).is_none());
        assert_eq!(hub.nick_owner("alice"), None);
        assert_eq!(hub.client_count(), 0);

        let b = registered(&mut hub, "alice");
        assert_eq!(hub.nick_owner("alice"), Some(b));
    }

    #[test]
    fn reply_prefix_depends_on_registration() {
        let mut hub = hub();
        let fresh = hub.connect("127.0.0.1:1".parse().unwrap());
        assert_eq!(hub.reply_prefix(fresh), ":irc.test ");
        let a = registered(&mut hub, "alice");
        assert_eq!(hub.reply_prefix(a), ":alice!alice@localhost ");
    }

    #[test]
    fn password_and_oper_checks() {
        let hub = hub();
        assert!(hub.check_password("secret"));
        assert!(!hub.check_password("Secret"));
        assert!(hub.find_oper("root", "toor"));
        assert!(!hub.find_oper("root", "nope"));
        assert!(!hub.find_oper("admin", "toor"));
    }
}
