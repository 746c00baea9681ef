//! Test helpers for integration tests
//!
//! Provides a harness wiring a `MessageLogger` to an in-memory session and
//! live settings, plus assertion helpers over the committed store.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use msglog_common::{LoggerSettings, SharedSettings};
use msglog_core::{ChannelInfo, LifecycleEvent, MessageRecord, Snowflake};
use msglog_engine::{DispatchReport, EngineContext, MessageLogger, MessageStore, SessionDirectory};
use serde_json::Value;

use crate::fixtures::unique_id;

/// A logger with one guild channel and a signed-in user
pub struct TestHarness {
    pub logger: MessageLogger,
    pub session: Arc<SessionDirectory>,
    pub settings: SharedSettings,
    pub me: Snowflake,
    pub guild_id: Snowflake,
    pub category_id: Snowflake,
    pub channel_id: Snowflake,
}

impl TestHarness {
    /// Start a harness with default settings
    pub fn start() -> Self {
        Self::with_settings(LoggerSettings::default())
    }

    pub fn with_settings(settings: LoggerSettings) -> Self {
        let me = unique_id();
        let guild_id = unique_id();
        let category_id = unique_id();
        let channel_id = unique_id();

        let session = Arc::new(SessionDirectory::new());
        session.set_current_user(Some(me));
        session.upsert_channel(ChannelInfo::guild_channel(
            channel_id,
            guild_id,
            Some(category_id),
        ));

        let settings = SharedSettings::new(settings);
        let ctx = EngineContext::new(
            session.clone(),
            session.clone(),
            Arc::new(settings.clone()),
        );
        let logger = MessageLogger::new(ctx, MessageStore::new_shared());

        Self {
            logger,
            session,
            settings,
            me,
            guild_id,
            category_id,
            channel_id,
        }
    }

    /// Put a record into the store and return its id
    pub fn seed(&self, record: MessageRecord) -> Snowflake {
        let id = record.id;
        self.logger.observe(record);
        id
    }

    pub fn dispatch(&self, event: &LifecycleEvent) -> DispatchReport {
        self.logger.dispatch(event)
    }

    /// Deserialize a host payload and dispatch it
    pub fn dispatch_json(&self, payload: Value) -> Result<DispatchReport> {
        let event: LifecycleEvent =
            serde_json::from_value(payload).context("Invalid lifecycle payload")?;
        Ok(self.dispatch(&event))
    }

    pub fn message(&self, id: Snowflake) -> Option<MessageRecord> {
        self.logger.store().message(self.channel_id, id)
    }

    /// The cached record, or an error naming the id
    pub fn expect_message(&self, id: Snowflake) -> Result<MessageRecord> {
        self.message(id)
            .ok_or_else(|| anyhow!("message {id} is not cached"))
    }
}

/// Assert a message is still cached as a tombstone with every attachment deleted
pub fn assert_tombstoned(harness: &TestHarness, id: Snowflake) -> Result<MessageRecord> {
    let record = harness.expect_message(id)?;
    if !record.deleted {
        bail!("message {id} was not tombstoned");
    }
    if let Some(live) = record.attachments.iter().find(|a| !a.deleted) {
        bail!("attachment {} of message {id} is not tombstoned", live.id);
    }
    Ok(record)
}

/// Assert a message is gone from the cache
pub fn assert_evicted(harness: &TestHarness, id: Snowflake) -> Result<()> {
    match harness.message(id) {
        None => Ok(()),
        Some(record) => bail!(
            "message {id} is still cached (deleted = {})",
            record.deleted
        ),
    }
}

/// Contents of the edit history, oldest first
pub fn history_contents(record: &MessageRecord) -> Vec<String> {
    record
        .edit_history
        .iter()
        .map(|entry| entry.content.clone())
        .collect()
}
