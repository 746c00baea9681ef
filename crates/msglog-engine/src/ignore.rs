//! Ignore rules
//!
//! Decides whether a lifecycle event for a message must bypass tombstoning
//! and history. Rules are evaluated in a fixed order and the first match
//! wins. Rules that need the current user or channel metadata resolve them
//! lazily; a lookup that fails or finds nothing makes that rule not match.

use std::cell::OnceCell;

use msglog_common::LoggerSettings;
use msglog_core::{ChannelInfo, ChannelLookup, MessageSubject, Snowflake, UserLookup};
use tracing::debug;

/// Which lifecycle event is being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Edit,
    Delete,
}

/// A single named suppression rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreRule {
    BotAuthor,
    OwnMessage,
    IgnoredUser,
    IgnoredChannel,
    IgnoredCategory,
    IgnoredGuild,
    EditsDisabled,
    DeletesDisabled,
}

impl IgnoreRule {
    /// Evaluation order
    pub const ORDER: [IgnoreRule; 8] = [
        Self::BotAuthor,
        Self::OwnMessage,
        Self::IgnoredUser,
        Self::IgnoredChannel,
        Self::IgnoredCategory,
        Self::IgnoredGuild,
        Self::EditsDisabled,
        Self::DeletesDisabled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BotAuthor => "bot_author",
            Self::OwnMessage => "own_message",
            Self::IgnoredUser => "ignored_user",
            Self::IgnoredChannel => "ignored_channel",
            Self::IgnoredCategory => "ignored_category",
            Self::IgnoredGuild => "ignored_guild",
            Self::EditsDisabled => "edits_disabled",
            Self::DeletesDisabled => "deletes_disabled",
        }
    }

    /// Check this rule alone against a context
    pub fn matches(self, ctx: &RuleContext<'_>) -> bool {
        let settings = ctx.settings;
        match self {
            Self::BotAuthor => settings.ignore_bots && ctx.author_bot,
            Self::OwnMessage => {
                settings.ignore_self
                    && ctx.author_id.is_some()
                    && ctx.author_id == ctx.current_user_id()
            }
            Self::IgnoredUser => settings.ignore_users.contains_opt(ctx.author_id),
            Self::IgnoredChannel => settings.ignore_channels.contains(ctx.channel_id),
            Self::IgnoredCategory => {
                !settings.ignore_channels.is_empty()
                    && settings
                        .ignore_channels
                        .contains_opt(ctx.channel().and_then(|c| c.parent_id))
            }
            Self::IgnoredGuild => {
                !settings.ignore_guilds.is_empty()
                    && settings
                        .ignore_guilds
                        .contains_opt(ctx.channel().and_then(|c| c.guild_id))
            }
            Self::EditsDisabled => ctx.kind == EventKind::Edit && !settings.log_edits,
            Self::DeletesDisabled => ctx.kind == EventKind::Delete && !settings.log_deletes,
        }
    }
}

impl std::fmt::Display for IgnoreRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a rule may consult for one message
pub struct RuleContext<'a> {
    pub author_id: Option<Snowflake>,
    pub author_bot: bool,
    pub channel_id: Snowflake,
    pub kind: EventKind,
    pub settings: &'a LoggerSettings,
    users: &'a dyn UserLookup,
    channels: &'a dyn ChannelLookup,
    current_user: OnceCell<Option<Snowflake>>,
    channel: OnceCell<Option<ChannelInfo>>,
}

impl<'a> RuleContext<'a> {
    pub fn new<M>(
        message: &M,
        kind: EventKind,
        settings: &'a LoggerSettings,
        users: &'a dyn UserLookup,
        channels: &'a dyn ChannelLookup,
    ) -> Self
    where
        M: MessageSubject + ?Sized,
    {
        Self {
            author_id: message.author_id(),
            author_bot: message.is_bot_author(),
            channel_id: message.channel_id(),
            kind,
            settings,
            users,
            channels,
            current_user: OnceCell::new(),
            channel: OnceCell::new(),
        }
    }

    /// Current user id, resolved on first use
    pub fn current_user_id(&self) -> Option<Snowflake> {
        *self
            .current_user
            .get_or_init(|| match self.users.current_user() {
                Ok(user) => user.map(|u| u.id),
                Err(e) => {
                    debug!(error = %e, "Current user lookup failed, self rule skipped");
                    None
                }
            })
    }

    /// Channel metadata, resolved on first use
    pub fn channel(&self) -> Option<&ChannelInfo> {
        self.channel
            .get_or_init(|| match self.channels.channel(self.channel_id) {
                Ok(channel) => channel,
                Err(e) => {
                    debug!(
                        channel_id = %self.channel_id,
                        error = %e,
                        "Channel lookup failed, category and guild rules skipped"
                    );
                    None
                }
            })
            .as_ref()
    }
}

/// Evaluates the ignore rules under one settings snapshot
#[derive(Clone, Copy)]
pub struct IgnoreEvaluator<'a> {
    settings: &'a LoggerSettings,
    users: &'a dyn UserLookup,
    channels: &'a dyn ChannelLookup,
}

impl<'a> IgnoreEvaluator<'a> {
    pub fn new(
        settings: &'a LoggerSettings,
        users: &'a dyn UserLookup,
        channels: &'a dyn ChannelLookup,
    ) -> Self {
        Self {
            settings,
            users,
            channels,
        }
    }

    /// First rule that suppresses the event, if any
    pub fn matching_rule<M>(&self, message: &M, kind: EventKind) -> Option<IgnoreRule>
    where
        M: MessageSubject + ?Sized,
    {
        let ctx = RuleContext::new(message, kind, self.settings, self.users, self.channels);
        IgnoreRule::ORDER.into_iter().find(|rule| rule.matches(&ctx))
    }

    /// Check if the event for this message must be suppressed
    pub fn should_ignore<M>(&self, message: &M, kind: EventKind) -> bool
    where
        M: MessageSubject + ?Sized,
    {
        self.matching_rule(message, kind).is_some()
    }
}
