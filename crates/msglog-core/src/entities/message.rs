//! Message record - a cached chat message plus the state the logger layers on top
//!
//! Records are values: every state transition consumes a record and returns the
//! next one, so a cache can swap them in atomically per key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{MessageFlags, Snowflake};

/// Message author as seen by the client cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Snowflake,
    #[serde(default)]
    pub bot: bool,
}

impl Author {
    /// Create a regular (non-bot) author
    pub fn user(id: Snowflake) -> Self {
        Self { id, bot: false }
    }

    /// Create a bot author
    pub fn bot(id: Snowflake) -> Self {
        Self { id, bot: true }
    }
}

/// A prior version of a message's content, captured right before an edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditEntry {
    /// Edit timestamp reported by the update that replaced this content
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

/// Attachment on a cached message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Snowflake,
    pub filename: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: u64,
    /// Tombstone flag; once set it is never cleared
    #[serde(default)]
    pub deleted: bool,
}

impl Attachment {
    /// Create a new Attachment
    pub fn new(id: Snowflake, filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            filename: filename.into(),
            url: url.into(),
            content_type: None,
            size: 0,
            deleted: false,
        }
    }

    /// Mark the attachment as deleted
    #[must_use]
    pub fn tombstoned(mut self) -> Self {
        self.deleted = true;
        self
    }
}

/// Cached message record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author: Author,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub flags: MessageFlags,
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    // Logger state
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub edit_history: Vec<EditEntry>,
    #[serde(default)]
    pub first_edit_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub diff_view_disabled: bool,
}

impl MessageRecord {
    /// Create a new, untouched record
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        author: Author,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            channel_id,
            author,
            content: content.into(),
            timestamp,
            edited_timestamp: None,
            flags: MessageFlags::empty(),
            attachments: Vec::new(),
            deleted: false,
            edit_history: Vec::new(),
            first_edit_timestamp: None,
            diff_view_disabled: false,
        }
    }

    /// Replace the attachment list
    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Replace the flag bits
    #[must_use]
    pub fn with_flags(mut self, flags: MessageFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub fn is_ephemeral(&self) -> bool {
        self.flags.is_ephemeral()
    }

    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited_timestamp.is_some()
    }

    #[inline]
    pub fn has_edit_history(&self) -> bool {
        !self.edit_history.is_empty()
    }

    /// Timestamp of the version currently held in `content`
    pub fn current_version_at(&self) -> DateTime<Utc> {
        self.edited_timestamp.unwrap_or(self.timestamp)
    }

    /// Timestamp shown for the original version in history views
    pub fn original_version_at(&self) -> DateTime<Utc> {
        self.first_edit_timestamp
            .unwrap_or_else(|| self.current_version_at())
    }

    /// Tombstone the record and every attachment on it
    ///
    /// The attachment list keeps its length; tombstoning twice is a no-op.
    #[must_use]
    pub fn tombstoned(mut self) -> Self {
        self.pin_first_edit_timestamp();
        self.deleted = true;
        self.attachments = self
            .attachments
            .into_iter()
            .map(Attachment::tombstoned)
            .collect();
        self
    }

    /// Append one entry to the edit history, keeping every prior entry
    #[must_use]
    pub fn with_edit(mut self, entry: EditEntry) -> Self {
        self.pin_first_edit_timestamp();
        self.edit_history.push(entry);
        self
    }

    /// Drop the edit history; `first_edit_timestamp` is left as is
    #[must_use]
    pub fn with_cleared_edit_history(mut self) -> Self {
        self.edit_history.clear();
        self
    }

    fn pin_first_edit_timestamp(&mut self) {
        if self.first_edit_timestamp.is_none() {
            self.first_edit_timestamp = Some(self.current_version_at());
        }
    }
}
