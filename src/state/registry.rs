//! Channel registry.

use std::collections::HashMap;

use super::channel::Channel;

/// Name to channel map. Names are case-sensitive keys.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, Channel>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(name)
    }

    /// Insert a new channel. Returns false, leaving the registry untouched, if
    /// the name is taken.
    pub fn insert(&mut self, channel: Channel) -> bool {
        if self.channels.contains_key(&channel.name) {
            return false;
        }
        self.channels.insert(channel.name.clone(), channel);
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<Channel> {
        self.channels.remove(name)
    }

    /// All channels, sorted by name.
    pub fn list(&self) -> Vec<&Channel> {
        let mut list: Vec<_> = self.channels.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
