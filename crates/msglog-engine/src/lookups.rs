//! In-memory session lookups
//!
//! Holds the signed-in user and known channel metadata for hosts that do
//! not bring their own stores.

use dashmap::DashMap;
use msglog_core::{ChannelInfo, ChannelLookup, CurrentUser, DomainResult, Snowflake, UserLookup};
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct SessionDirectory {
    current_user: RwLock<Option<CurrentUser>>,
    channels: DashMap<Snowflake, ChannelInfo>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the signed-in user
    pub fn set_current_user(&self, id: Option<Snowflake>) {
        *self.current_user.write() = id.map(|id| CurrentUser { id });
    }

    pub fn upsert_channel(&self, channel: ChannelInfo) {
        self.channels.insert(channel.id, channel);
    }

    pub fn remove_channel(&self, channel_id: Snowflake) -> Option<ChannelInfo> {
        self.channels.remove(&channel_id).map(|(_, channel)| channel)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

impl UserLookup for SessionDirectory {
    fn current_user(&self) -> DomainResult<Option<CurrentUser>> {
        Ok(*self.current_user.read())
    }
}

impl ChannelLookup for SessionDirectory {
    fn channel(&self, channel_id: Snowflake) -> DomainResult<Option<ChannelInfo>> {
        Ok(self.channels.get(&channel_id).map(|entry| entry.value().clone()))
    }
}
