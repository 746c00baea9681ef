//! Channel message cache - an immutable, cheaply cloned map of one channel's records
//!
//! Cloning shares the underlying map. A write through `&self` copies the map of
//! `Arc`s, never the records that did not change; a write through an owned or
//! `&mut` cache copies only while another snapshot still shares the map.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::entities::MessageRecord;
use crate::error::{DomainError, DomainResult};
use crate::traits::MessageCache;
use crate::value_objects::Snowflake;

/// Cached messages of a single channel, ordered by id (and so by creation time)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessages {
    channel_id: Snowflake,
    messages: Arc<BTreeMap<Snowflake, Arc<MessageRecord>>>,
}

impl ChannelMessages {
    /// Create an empty cache for a channel
    pub fn new(channel_id: Snowflake) -> Self {
        Self {
            channel_id,
            messages: Arc::new(BTreeMap::new()),
        }
    }

    #[inline]
    pub fn channel_id(&self) -> Snowflake {
        self.channel_id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Produce a cache with `record` inserted or replaced
    #[must_use]
    pub fn insert(&self, record: MessageRecord) -> Self {
        let mut next = self.clone();
        next.upsert(record);
        next
    }

    /// Insert or replace `record` in this cache
    pub fn upsert(&mut self, record: MessageRecord) {
        Arc::make_mut(&mut self.messages).insert(record.id, Arc::new(record));
    }

    /// Records in id order
    pub fn iter(&self) -> impl Iterator<Item = &MessageRecord> {
        self.messages.values().map(|m| &**m)
    }

    /// Most recent message by `author_id` that can still be edited
    ///
    /// Tombstoned records are never returned.
    pub fn last_editable(&self, author_id: Snowflake) -> Option<&MessageRecord> {
        self.messages
            .values()
            .rev()
            .map(|m| &**m)
            .find(|m| !m.deleted && m.author.id == author_id)
    }

    /// Number of tombstoned records
    pub fn deleted_count(&self) -> usize {
        self.iter().filter(|m| m.deleted).count()
    }
}

impl MessageCache for ChannelMessages {
    fn has(&self, id: Snowflake) -> bool {
        self.messages.contains_key(&id)
    }

    fn get(&self, id: Snowflake) -> Option<&MessageRecord> {
        self.messages.get(&id).map(|m| &**m)
    }

    fn update<F>(&self, id: Snowflake, f: F) -> DomainResult<Self>
    where
        F: FnOnce(MessageRecord) -> MessageRecord,
    {
        let current = self
            .messages
            .get(&id)
            .ok_or(DomainError::MessageNotFound(id))?;
        let next = checked_update(id, current, f)?;
        Ok(self.insert(next))
    }

    fn remove(&self, id: Snowflake) -> DomainResult<Self> {
        self.clone().into_removed(id).map_err(|(_, e)| e)
    }

    fn into_updated<F>(mut self, id: Snowflake, f: F) -> Result<Self, (Self, DomainError)>
    where
        F: FnOnce(MessageRecord) -> MessageRecord,
    {
        let result = match self.messages.get(&id) {
            Some(current) => checked_update(id, current, f),
            None => Err(DomainError::MessageNotFound(id)),
        };
        match result {
            Ok(next) => {
                self.upsert(next);
                Ok(self)
            }
            Err(e) => Err((self, e)),
        }
    }

    fn into_removed(mut self, id: Snowflake) -> Result<Self, (Self, DomainError)> {
        if !self.messages.contains_key(&id) {
            return Err((self, DomainError::MessageNotFound(id)));
        }
        Arc::make_mut(&mut self.messages).remove(&id);
        Ok(self)
    }
}

fn checked_update<F>(id: Snowflake, current: &MessageRecord, f: F) -> DomainResult<MessageRecord>
where
    F: FnOnce(MessageRecord) -> MessageRecord,
{
    let next = f(current.clone());
    if next.id != id {
        return Err(DomainError::CacheError(format!(
            "update of {id} produced record {}",
            next.id
        )));
    }
    Ok(next)
}
