//! Reconciliation engine
//!
//! Turns delete and update lifecycle events into a new channel cache. The
//! incoming cache is never mutated; every step returns a fresh snapshot.
//! When a step fails midway, the last good snapshot is handed back with the
//! error so earlier ids in a bulk delete stay applied.

use msglog_core::{
    DeleteRequest, DeleteTarget, EditEntry, MessageCache, MessageRecord, MessageSubject,
    MessageUpdate, Snowflake,
};
use tracing::{debug, error, info, instrument};

use crate::context::EngineContext;
use crate::error::EngineError;
use crate::history::{self, EditSkip};
use crate::ignore::{EventKind, IgnoreEvaluator, IgnoreRule};

/// Why a deleted message was removed instead of tombstoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictReason {
    /// Hard removal requested from the context menu
    UserRemoved,
    Ephemeral,
    Ignored(IgnoreRule),
}

/// What happened to one message id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    Tombstoned(Snowflake),
    Evicted { id: Snowflake, reason: EvictReason },
    /// The id was not in the cache
    Missing(Snowflake),
    EditRecorded { id: Snowflake, history_len: usize },
    /// Fields merged without a new history entry
    Updated { id: Snowflake, skipped: EditSkip },
}

impl MessageOutcome {
    pub fn id(&self) -> Snowflake {
        match self {
            Self::Tombstoned(id)
            | Self::Missing(id)
            | Self::Evicted { id, .. }
            | Self::EditRecorded { id, .. }
            | Self::Updated { id, .. } => *id,
        }
    }
}

/// Result of reconciling one event
#[derive(Debug)]
pub struct Reconciled<C> {
    /// The cache to store; `None` only when none was supplied
    pub cache: Option<C>,
    pub outcomes: Vec<MessageOutcome>,
    /// Set when a step failed; `cache` holds the last good snapshot
    pub error: Option<EngineError>,
}

impl<C> Reconciled<C> {
    fn untouched(cache: Option<C>) -> Self {
        Self {
            cache,
            outcomes: Vec::new(),
            error: None,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

/// Reconciler
pub struct Reconciler<'a> {
    ctx: &'a EngineContext,
}

impl<'a> Reconciler<'a> {
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Reconcile a single or bulk delete.
    ///
    /// Each target is evicted when the removal was user-initiated, the
    /// message is ephemeral, or an ignore rule matches; otherwise it is
    /// tombstoned. Ids not in the cache are skipped.
    #[instrument(skip(self, cache, request), fields(channel_id = %request.channel_id, bulk = request.is_bulk()))]
    pub fn handle_delete<C: MessageCache>(
        &self,
        cache: Option<C>,
        request: &DeleteRequest,
    ) -> Reconciled<C> {
        let Some(mut cache) = cache else {
            debug!("No cache for channel, delete ignored");
            return Reconciled::untouched(None);
        };

        if let Some(DeleteTarget::Single(id)) = &request.target {
            if !cache.has(*id) {
                debug!(message_id = %id, "Deleted message not cached");
                return Reconciled::untouched(Some(cache));
            }
        }

        let settings = self.ctx.settings();
        let evaluator = self.ctx.evaluator(&settings);
        let mut outcomes = Vec::with_capacity(request.ids().len());

        for &id in request.ids() {
            let Some(message) = cache.get(id) else {
                outcomes.push(MessageOutcome::Missing(id));
                continue;
            };

            let (step, outcome) = match eviction_reason(message, request.ml_deleted, &evaluator) {
                Some(reason) => (
                    cache.into_removed(id),
                    MessageOutcome::Evicted { id, reason },
                ),
                None => (
                    cache.into_updated(id, MessageRecord::tombstoned),
                    MessageOutcome::Tombstoned(id),
                ),
            };

            match step {
                Ok(next) => {
                    match &outcome {
                        MessageOutcome::Evicted { reason, .. } => {
                            debug!(message_id = %id, reason = ?reason, "Deleted message evicted");
                        }
                        _ => info!(message_id = %id, "Deleted message preserved"),
                    }
                    cache = next;
                    outcomes.push(outcome);
                }
                Err((last_good, e)) => {
                    error!(message_id = %id, error = %e, "Failed to reconcile delete");
                    return Reconciled {
                        cache: Some(last_good),
                        outcomes,
                        error: Some(EngineError::cache(id, e)),
                    };
                }
            }
        }

        Reconciled {
            cache: Some(cache),
            outcomes,
            error: None,
        }
    }

    /// Reconcile an update.
    ///
    /// A history entry holding the cached content is appended when the
    /// update is a genuine, non-ignored content edit. The update's fields
    /// are then merged onto the record either way.
    #[instrument(skip(self, cache, update), fields(channel_id = %update.channel_id, message_id = %update.id))]
    pub fn handle_update<C: MessageCache>(
        &self,
        cache: Option<C>,
        update: &MessageUpdate,
    ) -> Reconciled<C> {
        let Some(cache) = cache else {
            debug!("No cache for channel, update ignored");
            return Reconciled::untouched(None);
        };
        let Some(cached) = cache.get(update.id) else {
            debug!("Updated message not cached");
            return Reconciled {
                cache: Some(cache),
                outcomes: vec![MessageOutcome::Missing(update.id)],
                error: None,
            };
        };

        let settings = self.ctx.settings();
        let evaluator = self.ctx.evaluator(&settings);
        let subject = update_subject(update, cached);

        let entry = edit_entry(update, cached, subject, &evaluator);
        let tombstone_attachments = update.attachments.is_some()
            && evaluator.matching_rule(subject, EventKind::Delete).is_none();
        let history_len = cached.edit_history.len() + 1;

        let outcome = match &entry {
            Ok(_) => MessageOutcome::EditRecorded {
                id: update.id,
                history_len,
            },
            Err(skipped) => {
                debug!(reason = skipped.as_str(), "Edit not recorded");
                MessageOutcome::Updated {
                    id: update.id,
                    skipped: *skipped,
                }
            }
        };

        let result = cache.update(update.id, |record| {
            let record = match entry {
                Ok(entry) => record.with_edit(entry),
                Err(_) => record,
            };
            history::apply_update(record, update, tombstone_attachments)
        });

        match result {
            Ok(next) => {
                if let MessageOutcome::EditRecorded { history_len, .. } = outcome {
                    debug!(history_len, "Edit recorded");
                }
                Reconciled {
                    cache: Some(next),
                    outcomes: vec![outcome],
                    error: None,
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to reconcile update");
                Reconciled {
                    cache: Some(cache),
                    outcomes: Vec::new(),
                    error: Some(EngineError::cache(update.id, e)),
                }
            }
        }
    }
}

fn eviction_reason(
    message: &MessageRecord,
    ml_deleted: bool,
    evaluator: &IgnoreEvaluator<'_>,
) -> Option<EvictReason> {
    if ml_deleted {
        return Some(EvictReason::UserRemoved);
    }
    if message.is_ephemeral() {
        return Some(EvictReason::Ephemeral);
    }
    evaluator
        .matching_rule(message, EventKind::Delete)
        .map(EvictReason::Ignored)
}

/// Partial updates may omit the author; fall back to the cached one
fn update_subject<'m>(update: &'m MessageUpdate, cached: &'m MessageRecord) -> &'m dyn MessageSubject {
    if update.author.is_some() {
        update
    } else {
        cached
    }
}

fn edit_entry(
    update: &MessageUpdate,
    cached: &MessageRecord,
    subject: &dyn MessageSubject,
    evaluator: &IgnoreEvaluator<'_>,
) -> Result<EditEntry, EditSkip> {
    if update.flags.unwrap_or(cached.flags).is_ephemeral() {
        return Err(EditSkip::Ephemeral);
    }
    if let Some(rule) = evaluator.matching_rule(subject, EventKind::Edit) {
        return Err(EditSkip::Ignored(rule));
    }
    history::content_edit(update, cached)
}
