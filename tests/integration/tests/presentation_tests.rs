//! Presentation and context-menu flows
//!
//! Run with: cargo test -p integration-tests --test presentation_tests

use integration_tests::{at, delete_event, edit_event, MessageFixture, TestHarness};
use msglog_common::{DeleteStyle, LoggerSettings, OptionValue};
use msglog_core::{DiffKind, Snowflake};
use msglog_engine::diff::{new_side, old_side};
use msglog_engine::presentation::{delete_style_attribute, group_messages};
use msglog_engine::{create_message_diff, ActionOutcome, EditBody, MenuAction};

// ============================================================================
// Diff Tests
// ============================================================================

#[test]
fn test_diff_round_trip_both_ways() {
    let pairs = [
        ("hello there!", "hello there"),
        ("The meeting moved to Thursday", "The meeting is on Tuesday"),
        ("", "everything removed"),
        ("brand new", ""),
    ];
    for (new_content, old_content) in pairs {
        let parts = create_message_diff(new_content, old_content);
        assert_eq!(new_side(&parts), new_content);
        assert_eq!(old_side(&parts), old_content);

        let reversed = create_message_diff(old_content, new_content);
        assert_eq!(new_side(&reversed), old_content);
        assert_eq!(old_side(&reversed), new_content);
    }
}

#[test]
fn test_diff_serializes_with_type_tags() {
    let parts = create_message_diff("hello there", "hello");
    let json = serde_json::to_value(&parts).unwrap();
    assert_eq!(json[0]["type"], "unchanged");
    assert_eq!(json[1]["type"], "added");
    assert_eq!(json[1]["text"], " there");
}

// ============================================================================
// Inline Edit Tests
// ============================================================================

#[test]
fn test_render_edits_follow_live_settings() {
    let harness = TestHarness::start();
    let id = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(9), "hello").build());
    harness.dispatch(&edit_event(harness.channel_id, id, "hello there", at(10)));

    let rendered = harness.logger.render_edits(harness.channel_id, id).unwrap();
    assert_eq!(rendered.len(), 1);
    let EditBody::Diff(parts) = &rendered[0].body else {
        panic!("expected a diff body");
    };
    assert!(parts.iter().any(|p| p.kind == DiffKind::Added));

    harness.settings.update(|s| s.show_edit_diffs = false);
    let rendered = harness.logger.render_edits(harness.channel_id, id).unwrap();
    assert_eq!(rendered[0].body, EditBody::Plain("hello".to_string()));

    harness.settings.update(|s| s.inline_edits = false);
    assert!(harness.logger.render_edits(harness.channel_id, id).is_none());
}

// ============================================================================
// Context Menu Tests
// ============================================================================

#[test]
fn test_context_menu_lifecycle() {
    let harness = TestHarness::start();
    let id = harness.seed(MessageFixture::by_user(harness.channel_id, Snowflake::new(9), "v1").build());
    assert!(harness.logger.context_menu(harness.channel_id, id).is_empty());
    let outcome = harness
        .logger
        .perform(harness.channel_id, id, MenuAction::RemoveDeletedMessage)
        .unwrap();
    assert!(matches!(outcome, ActionOutcome::Nothing));
    assert!(!harness.expect_message(id).unwrap().deleted);

    harness.dispatch(&edit_event(harness.channel_id, id, "v2", at(5)));
    harness.dispatch(&delete_event(harness.channel_id, id));

    let ids: Vec<&str> = harness
        .logger
        .context_menu(harness.channel_id, id)
        .iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(
        ids,
        vec!["ml-toggle-delete-style", "ml-remove-message", "ml-view-history", "ml-clear-edits"]
    );

    let outcome = harness
        .logger
        .perform(harness.channel_id, id, MenuAction::ViewEditHistory)
        .unwrap();
    let ActionOutcome::HistoryView(text) = outcome else {
        panic!("expected a history view");
    };
    assert!(text.contains("Version 1 at"));
    assert!(text.ends_with("Current: v2"));

    harness
        .logger
        .perform(harness.channel_id, id, MenuAction::ClearEditHistory)
        .unwrap();
    let record = harness.expect_message(id).unwrap();
    assert!(record.edit_history.is_empty());
    assert!(record.deleted);

    harness
        .logger
        .perform(harness.channel_id, id, MenuAction::RemoveDeletedMessage)
        .unwrap();
    assert!(harness.message(id).is_none());
}

// ============================================================================
// Collapsed Groups and Styling
// ============================================================================

#[test]
fn test_collapsed_groups_over_store_snapshot() {
    let harness = TestHarness::with_settings(LoggerSettings {
        collapse_deleted: true,
        ..LoggerSettings::default()
    });
    let author = Snowflake::new(9);
    let ids: Vec<Snowflake> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|c| harness.seed(MessageFixture::by_user(harness.channel_id, author, c).build()))
        .collect();
    harness.dispatch(&delete_event(harness.channel_id, ids[1]));
    harness.dispatch(&delete_event(harness.channel_id, ids[2]));

    let snapshot = harness.logger.store().get_or_create(harness.channel_id);
    let settings = harness.logger.context().settings();
    let groups = group_messages(snapshot.iter(), &settings);

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[1].label().as_deref(), Some("2 deleted messages"));
    assert_eq!(snapshot.deleted_count(), 2);
    assert_eq!(snapshot.last_editable(author).map(|m| m.id), Some(ids[3]));
}

#[test]
fn test_delete_style_option() {
    let mut settings = LoggerSettings::default();
    assert_eq!(
        settings.option("deleteStyle"),
        Some(OptionValue::Text("text".to_string()))
    );
    settings.set_option("deleteStyle", "overlay").unwrap();
    assert_eq!(settings.delete_style, DeleteStyle::Overlay);
    assert_eq!(
        delete_style_attribute(settings.delete_style),
        ("data-ml-delete-style", "overlay")
    );
}
