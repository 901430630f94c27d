//! Channel operations on the Hub.
//!
//! Each operation validates first and mutates only once every check has
//! passed, so a rejected request leaves membership and operator sets exactly
//! as they were. Notices to other members are queued in the outbox; the
//! caller sends the requester's own reply.

use tracing::info;

use super::Hub;
use crate::error::HandlerError;
use crate::state::channel::{Channel, is_valid_channel_name};
use crate::state::client::ClientId;
use crate::state::outbox::Outbox;

/// One row of the channel listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub name: String,
    pub members: usize,
    pub topic: String,
}

impl Hub {
    /// Name of the channel `id` is in.
    pub fn current_channel(&self, id: ClientId) -> Result<String, HandlerError> {
        self.client(id)
            .and_then(|c| c.channel.clone())
            .ok_or(HandlerError::NotOnChannel)
    }

    fn ensure_outside_channel(&self, id: ClientId) -> Result<(), HandlerError> {
        match self.client(id).and_then(|c| c.channel.as_deref()) {
            Some(name) => Err(HandlerError::AlreadyInChannel(name.to_string())),
            None => Ok(()),
        }
    }

    /// The channel `id` is in, checked to be operated by `id`.
    fn operated_channel(&self, id: ClientId) -> Result<&Channel, HandlerError> {
        let name = self.current_channel(id)?;
        let channel = self
            .channels
            .get(&name)
            .ok_or(HandlerError::NoSuchChannel(name))?;
        if !channel.is_operator(id) {
            return Err(HandlerError::ChanOpPrivsNeeded);
        }
        Ok(channel)
    }

    /// Queue `{actor prefix}NOTICE {channel} :{text}` to every member but `except`.
    fn notice_members(
        &self,
        channel: &str,
        actor: ClientId,
        except: Option<ClientId>,
        text: &str,
        out: &mut Outbox,
    ) {
        let Some(chan) = self.channels.get(channel) else {
            return;
        };
        let line = format!("{}NOTICE {channel} :{text}", self.reply_prefix(actor));
        out.send_many(chan.members(), except, &line);
    }

    /// Create `name` with `id` as first member and operator.
    pub fn create_channel(
        &mut self,
        id: ClientId,
        name: &str,
        password: &str,
    ) -> Result<(), HandlerError> {
        self.ensure_outside_channel(id)?;
        if !is_valid_channel_name(name) {
            return Err(HandlerError::InvalidChannelName(name.to_string()));
        }
        if !self.channels.insert(Channel::new(name, password, id)) {
            return Err(HandlerError::ChannelExists(name.to_string()));
        }
        if let Some(client) = self.client_mut(id) {
            client.channel = Some(name.to_string());
        }
        info!(channel = name, creator = self.nick_of(id), "channel created");
        Ok(())
    }

    /// Add `id` to an existing channel and tell the members already there.
    pub fn join_channel(
        &mut self,
        id: ClientId,
        name: &str,
        password: &str,
        out: &mut Outbox,
    ) -> Result<(), HandlerError> {
        self.ensure_outside_channel(id)?;
        let nick = self.nick_of(id).to_string();
        let channel = self
            .channels
            .get(name)
            .ok_or_else(|| HandlerError::NoSuchChannel(name.to_string()))?;
        if channel.is_banned(&nick) {
            return Err(HandlerError::BannedFromChan(name.to_string()));
        }
        if !channel.check_password(password) {
            return Err(HandlerError::BadChannelKey(name.to_string()));
        }

        self.notice_members(name, id, None, &format!("{nick} has joined the channel"), out);
        if let Some(channel) = self.channels.get_mut(name) {
            channel.add_member(id);
        }
        if let Some(client) = self.client_mut(id) {
            client.channel = Some(name.to_string());
        }
        Ok(())
    }

    /// Remove `id` from its channel, telling the rest with `notice`.
    pub(super) fn part(&mut self, id: ClientId, notice: &str, out: &mut Outbox) -> Option<String> {
        let name = self.client_mut(id)?.channel.take()?;
        if let Some(channel) = self.channels.get_mut(&name) {
            channel.remove_member(id);
        }
        self.notice_members(&name, id, Some(id), notice, out);
        Some(name)
    }

    /// LEAVE: returns the channel left.
    pub fn leave_channel(&mut self, id: ClientId, out: &mut Outbox) -> Result<String, HandlerError> {
        let nick = self.nick_of(id).to_string();
        self.part(id, &format!("{nick} has left the channel"), out)
            .ok_or(HandlerError::NotOnChannel)
    }

    /// DELETE: force every member out and drop the channel.
    pub fn delete_channel(&mut self, id: ClientId, out: &mut Outbox) -> Result<String, HandlerError> {
        let name = self.operated_channel(id)?.name.clone();
        let nick = self.nick_of(id).to_string();

        self.notice_members(
            &name,
            id,
            Some(id),
            &format!("Channel {name} has been deleted by {nick}"),
            out,
        );
        let Some(channel) = self.channels.remove(&name) else {
            return Err(HandlerError::NoSuchChannel(name));
        };
        for member in channel.members() {
            if let Some(client) = self.client_mut(member) {
                client.channel = None;
            }
        }
        info!(channel = %name, by = %nick, "channel deleted");
        Ok(name)
    }

    /// KICK: remove and ban `target_nick`.
    pub fn kick(&mut self, id: ClientId, target_nick: &str, out: &mut Outbox) -> Result<(), HandlerError> {
        let channel = self.operated_channel(id)?;
        let name = channel.name.clone();
        let target = self
            .nick_owner(target_nick)
            .filter(|t| channel.is_member(*t))
            .ok_or_else(|| HandlerError::UserNotInChannel(target_nick.to_string()))?;
        if target == id {
            return Err(HandlerError::SelfKick);
        }

        let nick = self.nick_of(id).to_string();
        let target_nick = self.nick_of(target).to_string();
        out.send(
            target,
            format!(
                "{}NOTICE {name} :You have been kicked from {name} by {nick}",
                self.reply_prefix(id)
            ),
        );
        if let Some(channel) = self.channels.get_mut(&name) {
            channel.remove_member(target);
            channel.ban(&target_nick);
        }
        if let Some(client) = self.client_mut(target) {
            client.channel = None;
        }
        self.notice_members(
            &name,
            id,
            Some(id),
            &format!("{target_nick} has been kicked by {nick}"),
            out,
        );
        info!(channel = %name, kicked = %target_nick, by = %nick, "member kicked");
        Ok(())
    }

    /// ADDOP: grant channel operator status to another member.
    pub fn add_operator(
        &mut self,
        id: ClientId,
        target_nick: &str,
        out: &mut Outbox,
    ) -> Result<(), HandlerError> {
        let channel = self.operated_channel(id)?;
        let name = channel.name.clone();
        let target = self
            .nick_owner(target_nick)
            .filter(|t| channel.is_member(*t))
            .ok_or_else(|| HandlerError::UserNotInChannel(target_nick.to_string()))?;
        if target == id {
            return Err(HandlerError::SelfPromotion);
        }
        if channel.is_operator(target) {
            return Err(HandlerError::AlreadyOperator(self.nick_of(target).to_string()));
        }

        if let Some(channel) = self.channels.get_mut(&name) {
            channel.promote(target);
        }
        out.send(
            target,
            format!(
                "{}NOTICE {name} :You are now an operator of {name}",
                self.reply_prefix(id)
            ),
        );
        Ok(())
    }

    /// Current topic of the requester's channel, as (channel, text).
    pub fn topic(&self, id: ClientId) -> Result<(String, String), HandlerError> {
        let name = self.current_channel(id)?;
        let text = self
            .channels
            .get(&name)
            .map(|c| c.topic_text().to_string())
            .unwrap_or_default();
        Ok((name, text))
    }

    /// Change the topic and announce it to the other members.
    pub fn set_topic(&mut self, id: ClientId, text: &str, out: &mut Outbox) -> Result<String, HandlerError> {
        let name = self.operated_channel(id)?.name.clone();
        let nick = self.nick_of(id).to_string();
        if let Some(channel) = self.channels.get_mut(&name) {
            channel.set_topic(text, nick);
        }
        if let Some(channel) = self.channels.get(&name) {
            let line = format!("{}TOPIC {name} :{text}", self.reply_prefix(id));
            out.send_many(channel.members(), Some(id), &line);
        }
        Ok(name)
    }

    /// Relay `text` to every other member of the sender's channel.
    pub fn broadcast(&self, id: ClientId, text: &str, out: &mut Outbox) -> Result<(), HandlerError> {
        let name = self.current_channel(id)?;
        let channel = self
            .channels
            .get(&name)
            .ok_or_else(|| HandlerError::NoSuchChannel(name.clone()))?;
        let line = format!("{}PRIVMSG {name} :{text}", self.reply_prefix(id));
        out.send_many(channel.members(), Some(id), &line);
        Ok(())
    }

    /// Members of the requester's channel, operators marked with `@`, sorted
    /// by nickname.
    pub fn list_members(&self, id: ClientId) -> Result<(String, Vec<String>), HandlerError> {
        let name = self.current_channel(id)?;
        let channel = self
            .channels
            .get(&name)
            .ok_or_else(|| HandlerError::NoSuchChannel(name.clone()))?;
        let mut members: Vec<_> = channel
            .members()
            .map(|m| {
                let nick = self.nick_of(m);
                if channel.is_operator(m) {
                    (nick.to_ascii_lowercase(), format!("@{nick}"))
                } else {
                    (nick.to_ascii_lowercase(), nick.to_string())
                }
            })
            .collect();
        members.sort();
        Ok((name, members.into_iter().map(|(_, shown)| shown).collect()))
    }

    /// All channels, sorted by name.
    pub fn list_channels(&self) -> Vec<ChannelSummary> {
        self.channels
            .list()
            .into_iter()
            .map(|c| ChannelSummary {
                name: c.name.clone(),
                members: c.member_count(),
                topic: c.topic_text().to_string(),
            })
            .collect()
    }
}
