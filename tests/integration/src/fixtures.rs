//! Test fixtures and data generators
//!
//! Provides reusable records and event payloads for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use msglog_core::{
    Attachment, Author, LifecycleEvent, MessageDeleteBulkEvent, MessageDeleteEvent, MessageFlags,
    MessageRecord, MessageUpdate, MessageUpdateEvent, Snowflake,
};
use serde_json::{json, Value};

/// Counter for unique ids
static COUNTER: AtomicI64 = AtomicI64::new(1_000);

/// Get a unique snowflake for test data
pub fn unique_id() -> Snowflake {
    Snowflake::new(COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Fixed epoch all fixture timestamps are relative to
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    base_time() + Duration::seconds(seconds)
}

/// Builder for cached message records
#[derive(Debug, Clone)]
pub struct MessageFixture {
    record: MessageRecord,
}

impl MessageFixture {
    pub fn new(channel_id: Snowflake, author: Author, content: &str) -> Self {
        Self {
            record: MessageRecord::new(unique_id(), channel_id, author, content, base_time()),
        }
    }

    pub fn by_user(channel_id: Snowflake, user_id: Snowflake, content: &str) -> Self {
        Self::new(channel_id, Author::user(user_id), content)
    }

    pub fn by_bot(channel_id: Snowflake, content: &str) -> Self {
        Self::new(channel_id, Author::bot(unique_id()), content)
    }

    pub fn ephemeral(mut self) -> Self {
        self.record.flags |= MessageFlags::EPHEMERAL;
        self
    }

    pub fn with_image(mut self, filename: &str) -> Self {
        let id = unique_id();
        let mut attachment = Attachment::new(id, filename, format!("https://cdn.example/{id}"));
        attachment.content_type = Some("image/png".to_string());
        attachment.size = 1024;
        self.record.attachments.push(attachment);
        self
    }

    pub fn build(self) -> MessageRecord {
        self.record
    }
}

pub fn delete_event(channel_id: Snowflake, id: Snowflake) -> LifecycleEvent {
    LifecycleEvent::MessageDelete(MessageDeleteEvent::new(channel_id, id))
}

pub fn bulk_delete_event(channel_id: Snowflake, ids: &[Snowflake]) -> LifecycleEvent {
    LifecycleEvent::MessageDeleteBulk(MessageDeleteBulkEvent {
        channel_id,
        ids: ids.to_vec(),
    })
}

pub fn edit_event(
    channel_id: Snowflake,
    id: Snowflake,
    content: &str,
    edited_at: DateTime<Utc>,
) -> LifecycleEvent {
    LifecycleEvent::MessageUpdate(MessageUpdateEvent {
        message: MessageUpdate::edit(id, channel_id, content, edited_at),
    })
}

/// MESSAGE_DELETE as the host dispatcher would deliver it
pub fn delete_payload(channel_id: Snowflake, id: Snowflake, ml_deleted: bool) -> Value {
    json!({
        "type": "MESSAGE_DELETE",
        "channelId": channel_id.to_string(),
        "id": id.to_string(),
        "mlDeleted": ml_deleted,
    })
}

/// MESSAGE_UPDATE as the host dispatcher would deliver it
pub fn update_payload(
    channel_id: Snowflake,
    id: Snowflake,
    content: &str,
    edited_at: DateTime<Utc>,
) -> Value {
    json!({
        "type": "MESSAGE_UPDATE",
        "message": {
            "id": id.to_string(),
            "channel_id": channel_id.to_string(),
            "content": content,
            "edited_timestamp": edited_at.to_rfc3339(),
        },
    })
}
