//! Edit history accumulation and update merging
//!
//! Pure functions over records; the reconciler decides when to call them.

use std::collections::HashSet;

use msglog_core::{Attachment, EditEntry, MessageRecord, MessageUpdate, Snowflake};

/// Why an update did not add a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSkip {
    Ephemeral,
    Ignored(crate::ignore::IgnoreRule),
    NoEditTimestamp,
    NoContent,
    Unchanged,
}

impl EditSkip {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ephemeral => "ephemeral",
            Self::Ignored(_) => "ignored",
            Self::NoEditTimestamp => "no_edit_timestamp",
            Self::NoContent => "no_content",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Snapshot the cached content as a history entry stamped with the
/// incoming edit time. `None` when the update carries no edit time.
pub fn make_edit(new_message: &MessageUpdate, old_message: &MessageRecord) -> Option<EditEntry> {
    new_message.edited_timestamp.map(|timestamp| EditEntry {
        timestamp,
        content: old_message.content.clone(),
    })
}

/// Content-level checks for a history entry, independent of ignore rules
pub fn content_edit(update: &MessageUpdate, cached: &MessageRecord) -> Result<EditEntry, EditSkip> {
    let content = update.content.as_deref().ok_or(EditSkip::NoContent)?;
    if content == cached.content {
        return Err(EditSkip::Unchanged);
    }
    make_edit(update, cached).ok_or(EditSkip::NoEditTimestamp)
}

/// Merge an incoming attachment list into the cached one.
///
/// Attachments missing from `incoming` are tombstoned and placed first. An
/// attachment that was already tombstoned stays tombstoned.
pub fn merge_attachments(previous: &[Attachment], incoming: &[Attachment]) -> Vec<Attachment> {
    let incoming_ids: HashSet<Snowflake> = incoming.iter().map(|a| a.id).collect();
    let tombstoned_ids: HashSet<Snowflake> = previous
        .iter()
        .filter(|a| a.deleted)
        .map(|a| a.id)
        .collect();

    let removed = previous
        .iter()
        .filter(|a| !incoming_ids.contains(&a.id))
        .cloned()
        .map(Attachment::tombstoned);
    let kept = incoming.iter().cloned().map(|a| {
        if tombstoned_ids.contains(&a.id) {
            a.tombstoned()
        } else {
            a
        }
    });

    removed.chain(kept).collect()
}

/// Apply the fields an update carries onto a record.
///
/// Logger state (deleted, history, first edit time, diff toggle) is carried
/// over untouched. With `tombstone_attachments` unset, an incoming attachment
/// list replaces the cached one verbatim.
#[must_use]
pub fn apply_update(
    mut record: MessageRecord,
    update: &MessageUpdate,
    tombstone_attachments: bool,
) -> MessageRecord {
    if let Some(author) = &update.author {
        record.author = author.clone();
    }
    if let Some(content) = &update.content {
        record.content.clone_from(content);
    }
    if let Some(edited) = update.edited_timestamp {
        record.edited_timestamp = Some(edited);
    }
    if let Some(flags) = update.flags {
        record.flags = flags;
    }
    if let Some(incoming) = &update.attachments {
        record.attachments = if tombstone_attachments {
            merge_attachments(&record.attachments, incoming)
        } else {
            incoming.clone()
        };
    }
    record
}

/// Rebuild a cached record from a fresh copy of the same message.
///
/// Server fields come from `incoming`. The tombstone, edit history, first
/// edit time and diff toggle carry over from `previous`, and attachments
/// merge as they do on update.
#[must_use]
pub fn carry_over(previous: &MessageRecord, mut incoming: MessageRecord) -> MessageRecord {
    incoming.attachments = merge_attachments(&previous.attachments, &incoming.attachments);
    incoming.edit_history.clone_from(&previous.edit_history);
    incoming.first_edit_timestamp = previous.first_edit_timestamp;
    incoming.diff_view_disabled = previous.diff_view_disabled;
    if previous.deleted {
        incoming = incoming.tombstoned();
    }
    incoming
}

/// Drop a record's edit history
#[must_use]
pub fn clear_edit_history(record: MessageRecord) -> MessageRecord {
    record.with_cleared_edit_history()
}
