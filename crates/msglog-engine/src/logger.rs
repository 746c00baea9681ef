//! Message logger facade
//!
//! Wires lifecycle events and context-menu actions through the reconciler
//! and commits the resulting snapshots to the store.

use std::sync::Arc;

use msglog_core::{
    DeleteRequest, LifecycleEvent, MessageCache, MessageDeleteEvent, MessageRecord, Snowflake,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::context::EngineContext;
use crate::error::{EngineError, EngineResult};
use crate::history;
use crate::presentation::{self, MenuAction, MenuItem, RenderedEdit};
use crate::reconcile::{MessageOutcome, Reconciled, Reconciler};
use crate::store::MessageStore;

/// Summary of one dispatched event
#[derive(Debug)]
pub struct DispatchReport {
    pub event_type: &'static str,
    pub outcomes: Vec<MessageOutcome>,
    pub error: Option<EngineError>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

/// What a context-menu action produced
#[derive(Debug)]
pub enum ActionOutcome {
    /// Host should drop the deleted class from this element
    HighlightHidden { element_id: String },
    Dispatched(DispatchReport),
    HistoryView(String),
    HistoryCleared,
    /// Nothing to do for this message
    Nothing,
}

#[derive(Clone)]
pub struct MessageLogger {
    ctx: EngineContext,
    store: Arc<MessageStore>,
}

impl MessageLogger {
    pub fn new(ctx: EngineContext, store: Arc<MessageStore>) -> Self {
        Self { ctx, store }
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Record a message the host has just seen
    pub fn observe(&self, record: MessageRecord) {
        self.store.observe(record);
    }

    /// Reconcile one lifecycle event and commit the result.
    ///
    /// Failures never escape: the last good snapshot is committed and the
    /// error travels back in the report.
    #[instrument(skip_all, fields(event = event.event_type(), channel_id = %event.channel_id()))]
    pub fn dispatch(&self, event: &LifecycleEvent) -> DispatchReport {
        let reconciler = Reconciler::new(&self.ctx);
        let cache = self.store.get(event.channel_id());

        let result = match event {
            LifecycleEvent::MessageDelete(e) => {
                reconciler.handle_delete(cache, &DeleteRequest::from(e))
            }
            LifecycleEvent::MessageDeleteBulk(e) => {
                reconciler.handle_delete(cache, &DeleteRequest::from(e))
            }
            LifecycleEvent::MessageUpdate(e) => reconciler.handle_update(cache, &e.message),
        };

        let Reconciled {
            cache,
            outcomes,
            error,
        } = result;
        if let Some(cache) = cache {
            self.store.commit(cache);
        }
        if let Some(e) = &error {
            warn!(error = %e, code = e.error_code(), "Event partially applied");
        }

        DispatchReport {
            event_type: event.event_type(),
            outcomes,
            error,
        }
    }

    /// Menu items for a cached message
    pub fn context_menu(&self, channel_id: Snowflake, message_id: Snowflake) -> Vec<MenuItem> {
        self.store
            .message(channel_id, message_id)
            .map(|record| presentation::context_menu_items(&record))
            .unwrap_or_default()
    }

    /// Inline history entries for a cached message
    pub fn render_edits(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> Option<Vec<RenderedEdit>> {
        let record = self.store.message(channel_id, message_id)?;
        presentation::render_edits(&record, &self.ctx.settings())
    }

    /// Run a context-menu action against a cached message
    ///
    /// Actions the message's menu does not offer do nothing.
    #[instrument(skip(self))]
    pub fn perform(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        action: MenuAction,
    ) -> EngineResult<ActionOutcome> {
        let record = self
            .store
            .message(channel_id, message_id)
            .ok_or_else(|| EngineError::not_found("Message", message_id.to_string()))?;

        let offered = presentation::context_menu_items(&record)
            .iter()
            .any(|item| item.action == action);
        if !offered {
            debug!("Action not offered for message");
            return Ok(ActionOutcome::Nothing);
        }

        match action {
            MenuAction::HideDeleteHighlight => Ok(ActionOutcome::HighlightHidden {
                element_id: presentation::message_element_id(channel_id, message_id),
            }),
            MenuAction::RemoveDeletedMessage => {
                let event = LifecycleEvent::MessageDelete(MessageDeleteEvent::user_removal(
                    channel_id, message_id,
                ));
                Ok(ActionOutcome::Dispatched(self.dispatch(&event)))
            }
            MenuAction::ViewEditHistory => match presentation::format_history(&record) {
                Some(text) => {
                    info!("{text}");
                    Ok(ActionOutcome::HistoryView(text))
                }
                None => {
                    debug!("No edit history available");
                    Ok(ActionOutcome::Nothing)
                }
            },
            MenuAction::ClearEditHistory => {
                let cache = self.store.get_or_create(channel_id);
                let next = cache
                    .update(message_id, history::clear_edit_history)
                    .map_err(|e| EngineError::cache(message_id, e))?;
                self.store.commit(next);
                info!("Edit history cleared");
                Ok(ActionOutcome::HistoryCleared)
            }
        }
    }
}

impl std::fmt::Debug for MessageLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageLogger")
            .field("channels", &self.store.channel_count())
            .finish_non_exhaustive()
    }
}

/// Serializable form of a dispatch for host logs
#[derive(Debug, Serialize)]
pub struct DispatchSummary {
    pub event_type: &'static str,
    pub affected: Vec<Snowflake>,
    pub error: Option<String>,
}

impl From<&DispatchReport> for DispatchSummary {
    fn from(report: &DispatchReport) -> Self {
        Self {
            event_type: report.event_type,
            affected: report.outcomes.iter().map(MessageOutcome::id).collect(),
            error: report.error.as_ref().map(ToString::to_string),
        }
    }
}
