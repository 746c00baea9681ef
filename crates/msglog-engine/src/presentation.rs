//! Presentation adapter
//!
//! Turns cached records into view models: inline edit history, the history
//! log, context-menu items, collapsed deleted groups, and the class and
//! attribute names hosts hang styling on. Nothing here mutates a cache.

use chrono::{DateTime, Utc};
use msglog_common::{DeleteStyle, LoggerSettings};
use msglog_core::{Attachment, DiffKind, DiffPart, MessageRecord, Snowflake};
use serde::Serialize;

use crate::diff::create_message_diff;

pub const DELETED_CLASS: &str = "messagelogger-deleted";
pub const DELETED_ATTACHMENT_CLASS: &str = "messagelogger-deleted-attachment";
pub const EDITED_CLASS: &str = "messagelogger-edited";
pub const HISTORY_TIMESTAMP_CLASS: &str = "messagelogger-history-timestamp";
pub const DIFF_ADDED_CLASS: &str = "messagelogger-diff-added";
pub const DIFF_REMOVED_CLASS: &str = "messagelogger-diff-removed";

/// Root attribute carrying the configured delete style
pub const DELETE_STYLE_ATTRIBUTE: &str = "data-ml-delete-style";

pub fn diff_class(kind: DiffKind) -> Option<&'static str> {
    match kind {
        DiffKind::Unchanged => None,
        DiffKind::Added => Some(DIFF_ADDED_CLASS),
        DiffKind::Removed => Some(DIFF_REMOVED_CLASS),
    }
}

/// Attribute name and value to set on the host root
pub fn delete_style_attribute(style: DeleteStyle) -> (&'static str, &'static str) {
    (DELETE_STYLE_ATTRIBUTE, style.as_str())
}

pub fn message_class(record: &MessageRecord) -> Option<&'static str> {
    record.deleted.then_some(DELETED_CLASS)
}

pub fn attachment_class(attachment: &Attachment) -> Option<&'static str> {
    attachment.deleted.then_some(DELETED_ATTACHMENT_CLASS)
}

/// DOM id of a rendered message
pub fn message_element_id(channel_id: Snowflake, message_id: Snowflake) -> String {
    format!("chat-messages-{channel_id}-{message_id}")
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

// === Inline edits ===

/// Body of one rendered history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EditBody {
    Plain(String),
    /// Diff from this version to the next one
    Diff(Vec<DiffPart>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEdit {
    pub body: EditBody,
    pub timestamp: DateTime<Utc>,
    /// "(edited <time>)"
    pub label: String,
}

/// Render one historical version, diffed against the version that replaced it
pub fn parse_edit_content(content: &str, next_content: Option<&str>, show_diffs: bool) -> EditBody {
    match next_content {
        Some(next) if show_diffs && next != content => {
            EditBody::Diff(create_message_diff(next, content))
        }
        _ => EditBody::Plain(content.to_owned()),
    }
}

/// Inline history entries for a record, oldest first.
///
/// `None` when inline edits are turned off or there is no history.
pub fn render_edits(record: &MessageRecord, settings: &LoggerSettings) -> Option<Vec<RenderedEdit>> {
    if !settings.inline_edits || !record.has_edit_history() {
        return None;
    }
    let show_diffs = settings.show_edit_diffs && !record.diff_view_disabled;
    let history = &record.edit_history;

    let rendered = history
        .iter()
        .enumerate()
        .map(|(idx, edit)| {
            let next = history
                .get(idx + 1)
                .map_or(record.content.as_str(), |e| e.content.as_str());
            RenderedEdit {
                body: parse_edit_content(&edit.content, Some(next), show_diffs),
                timestamp: edit.timestamp,
                label: format!("(edited {})", format_timestamp(edit.timestamp)),
            }
        })
        .collect();
    Some(rendered)
}

/// Multi-line history log for a record, or `None` without history
pub fn format_history(record: &MessageRecord) -> Option<String> {
    if !record.has_edit_history() {
        return None;
    }
    let mut lines = Vec::with_capacity(record.edit_history.len() + 3);
    lines.push(format!("Edit History for message {}:", record.id));
    lines.push(format!(
        "  Original at {}",
        format_timestamp(record.original_version_at())
    ));
    lines.extend(record.edit_history.iter().enumerate().map(|(idx, edit)| {
        format!(
            "  Version {} at {}: {}",
            idx + 1,
            format_timestamp(edit.timestamp),
            edit.content
        )
    }));
    lines.push(format!("  Current: {}", record.content));
    Some(lines.join("\n"))
}

// === Context menu ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    HideDeleteHighlight,
    RemoveDeletedMessage,
    ViewEditHistory,
    ClearEditHistory,
}

impl MenuAction {
    /// Stable menu item id
    pub const fn id(self) -> &'static str {
        match self {
            Self::HideDeleteHighlight => "ml-toggle-delete-style",
            Self::RemoveDeletedMessage => "ml-remove-message",
            Self::ViewEditHistory => "ml-view-history",
            Self::ClearEditHistory => "ml-clear-edits",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        [
            Self::HideDeleteHighlight,
            Self::RemoveDeletedMessage,
            Self::ViewEditHistory,
            Self::ClearEditHistory,
        ]
        .into_iter()
        .find(|action| action.id() == id)
    }

    pub const fn is_danger(self) -> bool {
        matches!(self, Self::RemoveDeletedMessage | Self::ClearEditHistory)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: String,
    pub danger: bool,
    pub action: MenuAction,
}

impl MenuItem {
    fn new(action: MenuAction, label: impl Into<String>) -> Self {
        Self {
            id: action.id(),
            label: label.into(),
            danger: action.is_danger(),
            action,
        }
    }
}

/// Menu items for a message; empty for untouched messages
pub fn context_menu_items(record: &MessageRecord) -> Vec<MenuItem> {
    let mut items = Vec::new();
    if record.deleted {
        items.push(MenuItem::new(MenuAction::HideDeleteHighlight, "Hide Delete Highlight"));
        items.push(MenuItem::new(MenuAction::RemoveDeletedMessage, "Remove Deleted Message"));
    }
    if record.has_edit_history() {
        items.push(MenuItem::new(
            MenuAction::ViewEditHistory,
            format!("View Edit History ({})", record.edit_history.len()),
        ));
        items.push(MenuItem::new(MenuAction::ClearEditHistory, "Clear Edit History"));
    }
    items
}

// === Collapsed deleted groups ===

pub fn deleted_count_label(count: usize) -> String {
    match count {
        0 => "No deleted messages".to_owned(),
        1 => "1 deleted message".to_owned(),
        n => format!("{n} deleted messages"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageGroup<'a> {
    Message(&'a MessageRecord),
    /// A run of consecutive tombstoned messages
    Deleted(Vec<&'a MessageRecord>),
}

impl MessageGroup<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Message(_) => 1,
            Self::Deleted(run) => run.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn label(&self) -> Option<String> {
        match self {
            Self::Message(_) => None,
            Self::Deleted(run) => Some(deleted_count_label(run.len())),
        }
    }
}

/// Group messages for display, collapsing runs of tombstones when enabled
pub fn group_messages<'a, I>(messages: I, settings: &LoggerSettings) -> Vec<MessageGroup<'a>>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let mut groups = Vec::new();
    for record in messages {
        if !settings.collapse_deleted || !record.deleted {
            groups.push(MessageGroup::Message(record));
            continue;
        }
        match groups.last_mut() {
            Some(MessageGroup::Deleted(run)) => run.push(record),
            _ => groups.push(MessageGroup::Deleted(vec![record])),
        }
    }
    groups
}
