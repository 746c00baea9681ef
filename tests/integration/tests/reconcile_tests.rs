//! Reconciliation scenarios
//!
//! Drive delete and update events through the logger facade and check the
//! committed store.
//!
//! Run with: cargo test -p integration-tests --test reconcile_tests

use integration_tests::{
    assert_evicted, assert_tombstoned, at, bulk_delete_event, delete_event, delete_payload,
    edit_event, history_contents, update_payload, MessageFixture, TestHarness,
};
use msglog_common::{IdList, LoggerSettings};
use msglog_core::{
    ChannelInfo, ChannelLookup, CurrentUser, DomainError, DomainResult, Snowflake, UserLookup,
};
use msglog_engine::{EvictReason, IgnoreRule, MessageOutcome};

// ============================================================================
// Delete Tests
// ============================================================================

#[test]
fn test_ordinary_delete_keeps_tombstone() {
    let harness = TestHarness::start();
    let id = harness.seed(
        MessageFixture::by_user(harness.channel_id, Snowflake::new(42), "keep me")
            .with_image("cat.png")
            .with_image("dog.png")
            .build(),
    );

    let report = harness.dispatch(&delete_event(harness.channel_id, id));
    assert!(report.is_clean());

    let record = assert_tombstoned(&harness, id).unwrap();
    assert_eq!(record.content, "keep me");
    assert_eq!(record.attachments.len(), 2);
}

#[test]
fn test_ephemeral_delete_always_evicts() {
    let harness = TestHarness::start();
    let id = harness.seed(
        MessageFixture::by_user(harness.channel_id, Snowflake::new(42), "only you can see this")
            .ephemeral()
            .build(),
    );

    let report = harness.dispatch(&delete_event(harness.channel_id, id));
    assert_evicted(&harness, id).unwrap();
    assert_eq!(
        report.outcomes,
        vec![MessageOutcome::Evicted {
            id,
            reason: EvictReason::Ephemeral
        }]
    );
}

#[test]
fn test_ignored_bot_delete_evicts() {
    let harness = TestHarness::with_settings(LoggerSettings {
        ignore_bots: true,
        ..LoggerSettings::default()
    });
    let id = harness.seed(MessageFixture::by_bot(harness.channel_id, "beep boop").build());

    harness.dispatch(&delete_event(harness.channel_id, id));
    assert_evicted(&harness, id).unwrap();
}

#[test]
fn test_bulk_delete_with_one_ignored_author() {
    let ignored = Snowflake::new(7);
    let harness = TestHarness::with_settings(LoggerSettings {
        ignore_users: IdList::from(vec![ignored]),
        ..LoggerSettings::default()
    });
    let kept_a = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(8), "a").build());
    let dropped = harness.seed(MessageFixture::by_user(harness.channel_id, ignored, "b").build());
    let kept_b = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(8), "c").build());
    let bystander = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(8), "d").build());

    let report = harness.dispatch(&bulk_delete_event(
        harness.channel_id,
        &[kept_a, dropped, kept_b],
    ));
    assert!(report.is_clean());

    assert_tombstoned(&harness, kept_a).unwrap();
    assert_tombstoned(&harness, kept_b).unwrap();
    assert_evicted(&harness, dropped).unwrap();
    assert!(!harness.expect_message(bystander).unwrap().deleted);
    assert!(report.outcomes.contains(&MessageOutcome::Evicted {
        id: dropped,
        reason: EvictReason::Ignored(IgnoreRule::IgnoredUser),
    }));
}

#[test]
fn test_user_removal_evicts_regardless_of_rules() {
    let harness = TestHarness::start();
    let id = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(9), "x").build());
    harness.dispatch(&delete_event(harness.channel_id, id));
    assert_tombstoned(&harness, id).unwrap();

    let report = harness
        .dispatch_json(delete_payload(harness.channel_id, id, true))
        .unwrap();
    assert_evicted(&harness, id).unwrap();
    assert_eq!(
        report.outcomes,
        vec![MessageOutcome::Evicted {
            id,
            reason: EvictReason::UserRemoved
        }]
    );
}

#[test]
fn test_second_delete_is_idempotent() {
    let harness = TestHarness::start();
    let id = harness.seed(
        MessageFixture::by_user(harness.channel_id, Snowflake::new(9), "x")
            .with_image("a.png")
            .build(),
    );
    harness.dispatch(&delete_event(harness.channel_id, id));
    let first = harness.expect_message(id).unwrap();
    harness.dispatch(&delete_event(harness.channel_id, id));
    assert_eq!(harness.expect_message(id).unwrap(), first);
}

#[test]
fn test_category_and_guild_rules_use_channel_metadata() {
    let harness = TestHarness::start();
    let id = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(9), "x").build());

    harness.settings.update(|s| s.ignore_channels = IdList::from(vec![harness.category_id]));
    harness.dispatch(&delete_event(harness.channel_id, id));
    assert_evicted(&harness, id).unwrap();

    let id = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(9), "y").build());
    harness.settings.update(|s| {
        s.ignore_channels = IdList::default();
        s.ignore_guilds = IdList::from(vec![harness.guild_id]);
    });
    harness.dispatch(&delete_event(harness.channel_id, id));
    assert_evicted(&harness, id).unwrap();
}

#[test]
fn test_unknown_channel_metadata_fails_open() {
    let harness = TestHarness::with_settings(LoggerSettings::default());
    harness.session.remove_channel(harness.channel_id);
    harness.settings.update(|s| s.ignore_guilds = IdList::from(vec![harness.guild_id]));

    let id = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(9), "x").build());
    harness.dispatch(&delete_event(harness.channel_id, id));
    assert_tombstoned(&harness, id).unwrap();
}

// ============================================================================
// Update Tests
// ============================================================================

#[test]
fn test_two_edits_build_history() {
    let harness = TestHarness::start();
    let id = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(9), "hello").build());

    harness.dispatch(&edit_event(harness.channel_id, id, "hello there", at(10)));
    harness.dispatch(&edit_event(harness.channel_id, id, "hello there!", at(20)));

    let record = harness.expect_message(id).unwrap();
    assert_eq!(history_contents(&record), vec!["hello", "hello there"]);
    assert_eq!(record.content, "hello there!");
    assert_eq!(record.edit_history[0].timestamp, at(10));
    assert_eq!(record.edit_history[1].timestamp, at(20));
}

#[test]
fn test_noop_edits_do_not_grow_history() {
    let harness = TestHarness::start();
    let id = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(9), "same").build());

    harness.dispatch(&edit_event(harness.channel_id, id, "same", at(10)));
    let report = harness
        .dispatch_json(serde_json::json!({
            "type": "MESSAGE_UPDATE",
            "message": {
                "id": id.to_string(),
                "channel_id": harness.channel_id.to_string(),
                "content": "changed, but no edit time",
            },
        }))
        .unwrap();

    let record = harness.expect_message(id).unwrap();
    assert!(record.edit_history.is_empty());
    assert_eq!(record.content, "changed, but no edit time");
    assert!(matches!(report.outcomes[0], MessageOutcome::Updated { .. }));
}

#[test]
fn test_edits_disabled_still_merge_content() {
    let harness = TestHarness::with_settings(LoggerSettings {
        log_edits: false,
        ..LoggerSettings::default()
    });
    let id = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(9), "a").build());
    harness
        .dispatch_json(update_payload(harness.channel_id, id, "b", at(5)))
        .unwrap();

    let record = harness.expect_message(id).unwrap();
    assert!(record.edit_history.is_empty());
    assert_eq!(record.content, "b");
}

#[test]
fn test_edit_after_delete_keeps_tombstone_and_history() {
    let harness = TestHarness::start();
    let id = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(9), "v1").build());
    harness.dispatch(&edit_event(harness.channel_id, id, "v2", at(5)));
    harness.dispatch(&delete_event(harness.channel_id, id));

    let record = assert_tombstoned(&harness, id).unwrap();
    assert_eq!(history_contents(&record), vec!["v1"]);
    assert_eq!(record.content, "v2");
}

#[test]
fn test_reloaded_message_keeps_logged_state() {
    let harness = TestHarness::start();
    let author = Snowflake::new(9);
    let id = harness.seed(
        MessageFixture::by_user(harness.channel_id, author, "hello")
            .with_image("cat.png")
            .build(),
    );
    harness.dispatch(&edit_event(harness.channel_id, id, "hello there", at(10)));
    harness.dispatch(&delete_event(harness.channel_id, id));
    let before = assert_tombstoned(&harness, id).unwrap();

    let mut reloaded = MessageFixture::by_user(harness.channel_id, author, "hello there").build();
    reloaded.id = id;
    reloaded.edited_timestamp = Some(at(10));
    harness.seed(reloaded);

    let record = assert_tombstoned(&harness, id).unwrap();
    assert_eq!(history_contents(&record), vec!["hello"]);
    assert_eq!(record.first_edit_timestamp, before.first_edit_timestamp);
    assert_eq!(record.attachments.len(), 1);
}

#[test]
fn test_own_edits_ignored_with_ignore_self() {
    let harness = TestHarness::with_settings(LoggerSettings {
        ignore_self: true,
        ..LoggerSettings::default()
    });
    let id = harness.seed(MessageFixture::by_user(harness.channel_id, harness.me, "mine").build());
    harness.dispatch(&edit_event(harness.channel_id, id, "mine!", at(5)));
    assert!(harness.expect_message(id).unwrap().edit_history.is_empty());

    harness.dispatch(&delete_event(harness.channel_id, id));
    assert_evicted(&harness, id).unwrap();
}

// ============================================================================
// Lookup Failure Tests
// ============================================================================

struct Offline;

impl UserLookup for Offline {
    fn current_user(&self) -> DomainResult<Option<CurrentUser>> {
        Err(DomainError::LookupFailed("user store offline".into()))
    }
}

impl ChannelLookup for Offline {
    fn channel(&self, _channel_id: Snowflake) -> DomainResult<Option<ChannelInfo>> {
        Err(DomainError::LookupFailed("channel store offline".into()))
    }
}

#[test]
fn test_offline_lookups_never_suppress_logging() {
    use std::sync::Arc;

    use msglog_engine::{EngineContext, MessageLogger, MessageStore};

    let channel_id = Snowflake::new(100);
    let settings = LoggerSettings {
        ignore_self: true,
        ignore_guilds: IdList::parse("1,2,3"),
        ..LoggerSettings::default()
    };
    let logger = MessageLogger::new(
        EngineContext::new(Arc::new(Offline), Arc::new(Offline), Arc::new(settings)),
        MessageStore::new_shared(),
    );
    let record = MessageFixture::by_user(channel_id, Snowflake::new(1), "hi").build();
    let id = record.id;
    logger.observe(record);

    let report = logger.dispatch(&delete_event(channel_id, id));
    assert!(report.is_clean());
    assert!(logger.store().message(channel_id, id).unwrap().deleted);
}
