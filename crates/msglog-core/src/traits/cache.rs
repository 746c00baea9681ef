//! Message cache port
//!
//! A cache is a value: `update` and `remove` never mutate the receiver, they
//! return the next cache. The host decides when to commit it.

use crate::entities::MessageRecord;
use crate::error::{DomainError, DomainResult};
use crate::value_objects::Snowflake;

/// Per-channel message cache with copy-on-write updates
pub trait MessageCache: Sized {
    /// Check if a message is cached
    fn has(&self, id: Snowflake) -> bool;

    /// Get a cached message
    fn get(&self, id: Snowflake) -> Option<&MessageRecord>;

    /// Produce a cache where `id` is replaced by `f(record)`
    fn update<F>(&self, id: Snowflake, f: F) -> DomainResult<Self>
    where
        F: FnOnce(MessageRecord) -> MessageRecord;

    /// Produce a cache without `id`
    fn remove(&self, id: Snowflake) -> DomainResult<Self>;

    /// Consuming form of [`update`](Self::update); on failure the cache comes back unchanged
    ///
    /// Implementations may write in place when they own their storage exclusively.
    fn into_updated<F>(self, id: Snowflake, f: F) -> Result<Self, (Self, DomainError)>
    where
        F: FnOnce(MessageRecord) -> MessageRecord,
    {
        match self.update(id, f) {
            Ok(next) => Ok(next),
            Err(e) => Err((self, e)),
        }
    }

    /// Consuming form of [`remove`](Self::remove); on failure the cache comes back unchanged
    fn into_removed(self, id: Snowflake) -> Result<Self, (Self, DomainError)> {
        match self.remove(id) {
            Ok(next) => Ok(next),
            Err(e) => Err((self, e)),
        }
    }
}
