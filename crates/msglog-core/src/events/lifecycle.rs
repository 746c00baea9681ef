//! Lifecycle events - the three message events the logger intercepts
//!
//! Events arrive as JSON objects tagged by `type`:
//! - `MESSAGE_DELETE`      `{ channelId, id, mlDeleted? }`
//! - `MESSAGE_DELETE_BULK` `{ channelId, ids }`
//! - `MESSAGE_UPDATE`      `{ message }`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Attachment, Author};
use crate::value_objects::{MessageFlags, Snowflake};

/// All lifecycle events the engine reacts to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleEvent {
    MessageDelete(MessageDeleteEvent),
    MessageDeleteBulk(MessageDeleteBulkEvent),
    MessageUpdate(MessageUpdateEvent),
}

impl LifecycleEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MessageDelete(_) => "MESSAGE_DELETE",
            Self::MessageDeleteBulk(_) => "MESSAGE_DELETE_BULK",
            Self::MessageUpdate(_) => "MESSAGE_UPDATE",
        }
    }

    /// Channel whose cache the event targets
    pub fn channel_id(&self) -> Snowflake {
        match self {
            Self::MessageDelete(e) => e.channel_id,
            Self::MessageDeleteBulk(e) => e.channel_id,
            Self::MessageUpdate(e) => e.message.channel_id,
        }
    }
}

/// MESSAGE_DELETE payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDeleteEvent {
    pub channel_id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    /// Set when the user asked to hard-remove a tombstoned message
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ml_deleted: bool,
}

impl MessageDeleteEvent {
    pub fn new(channel_id: Snowflake, id: Snowflake) -> Self {
        Self {
            channel_id,
            id: Some(id),
            ml_deleted: false,
        }
    }

    /// A delete re-dispatched by the user to drop a tombstone for good
    pub fn user_removal(channel_id: Snowflake, id: Snowflake) -> Self {
        Self {
            channel_id,
            id: Some(id),
            ml_deleted: true,
        }
    }
}

/// MESSAGE_DELETE_BULK payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDeleteBulkEvent {
    pub channel_id: Snowflake,
    #[serde(default)]
    pub ids: Vec<Snowflake>,
}

/// MESSAGE_UPDATE payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageUpdateEvent {
    pub message: MessageUpdate,
}

/// Partial message carried by MESSAGE_UPDATE
///
/// Absent fields leave the cached value alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageUpdate {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl MessageUpdate {
    /// Create an update carrying new content and its edit timestamp
    pub fn edit(
        id: Snowflake,
        channel_id: Snowflake,
        content: impl Into<String>,
        edited_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            channel_id,
            author: None,
            content: Some(content.into()),
            edited_timestamp: Some(edited_timestamp),
            flags: None,
            attachments: None,
        }
    }

    /// Check if the update carries the ephemeral flag
    #[inline]
    pub fn is_ephemeral(&self) -> bool {
        self.flags.is_some_and(MessageFlags::is_ephemeral)
    }
}

/// Which cached ids a delete targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Single(Snowflake),
    Bulk(Vec<Snowflake>),
}

/// A delete as the reconciliation engine consumes it
///
/// Single and bulk deletes differ only in `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub channel_id: Snowflake,
    /// `None` when the event arrived without a usable id
    pub target: Option<DeleteTarget>,
    pub ml_deleted: bool,
}

impl DeleteRequest {
    #[inline]
    pub fn is_bulk(&self) -> bool {
        matches!(self.target, Some(DeleteTarget::Bulk(_)))
    }

    /// Targeted ids in delivery order
    pub fn ids(&self) -> &[Snowflake] {
        match &self.target {
            Some(DeleteTarget::Single(id)) => std::slice::from_ref(id),
            Some(DeleteTarget::Bulk(ids)) => ids,
            None => &[],
        }
    }
}

impl From<&MessageDeleteEvent> for DeleteRequest {
    fn from(event: &MessageDeleteEvent) -> Self {
        Self {
            channel_id: event.channel_id,
            target: event.id.map(DeleteTarget::Single),
            ml_deleted: event.ml_deleted,
        }
    }
}

impl From<&MessageDeleteBulkEvent> for DeleteRequest {
    fn from(event: &MessageDeleteBulkEvent) -> Self {
        Self {
            channel_id: event.channel_id,
            target: Some(DeleteTarget::Bulk(event.ids.clone())),
            ml_deleted: false,
        }
    }
}
