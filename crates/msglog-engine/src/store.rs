//! Message store
//!
//! Holds the current cache snapshot of every channel using `DashMap` for
//! concurrent access. Reconciliation never writes here directly; callers
//! commit the snapshot it returns.

use std::sync::Arc;

use dashmap::DashMap;
use msglog_core::{ChannelMessages, MessageCache, MessageRecord, Snowflake};
use tracing::debug;

use crate::history;

#[derive(Debug, Default)]
pub struct MessageStore {
    channels: DashMap<Snowflake, ChannelMessages>,
}

impl MessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Current snapshot for a channel, if one was ever created
    pub fn get(&self, channel_id: Snowflake) -> Option<ChannelMessages> {
        self.channels.get(&channel_id).map(|entry| entry.value().clone())
    }

    /// Current snapshot for a channel, creating an empty one if needed
    pub fn get_or_create(&self, channel_id: Snowflake) -> ChannelMessages {
        self.channels
            .entry(channel_id)
            .or_insert_with(|| ChannelMessages::new(channel_id))
            .value()
            .clone()
    }

    /// Replace a channel's snapshot
    pub fn commit(&self, cache: ChannelMessages) {
        tracing::trace!(channel_id = %cache.channel_id(), len = cache.len(), "Cache committed");
        self.channels.insert(cache.channel_id(), cache);
    }

    /// Record a newly seen or reloaded message
    ///
    /// A reload keeps the tombstone and edit history already cached for it.
    pub fn observe(&self, record: MessageRecord) {
        let channel_id = record.channel_id;
        let mut entry = self
            .channels
            .entry(channel_id)
            .or_insert_with(|| ChannelMessages::new(channel_id));
        let cache = entry.value_mut();
        let record = match cache.get(record.id) {
            Some(previous) => {
                debug!(message_id = %record.id, "Reloaded message merged");
                history::carry_over(previous, record)
            }
            None => record,
        };
        cache.upsert(record);
    }

    /// Copy of one cached message
    pub fn message(&self, channel_id: Snowflake, id: Snowflake) -> Option<MessageRecord> {
        self.channels
            .get(&channel_id)
            .and_then(|entry| entry.value().get(id).cloned())
    }

    /// Drop a channel's cache entirely
    pub fn evict_channel(&self, channel_id: Snowflake) -> bool {
        self.channels.remove(&channel_id).is_some()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}
