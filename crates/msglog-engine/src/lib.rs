//! # msglog-engine
//!
//! Reconciles message lifecycle events against per-channel caches so that
//! deleted messages survive as tombstones and edits accumulate history.
//!
//! - [`ignore`]: ordered ignore rules
//! - [`reconcile`]: delete and update reconciliation
//! - [`history`]: edit history and update merging
//! - [`diff`]: word-level content diffs
//! - [`presentation`]: view models for hosts
//! - [`MessageLogger`]: dispatch facade over a [`MessageStore`]

pub mod context;
pub mod diff;
pub mod error;
pub mod history;
pub mod ignore;
pub mod logger;
pub mod lookups;
pub mod presentation;
pub mod reconcile;
pub mod store;

pub use context::EngineContext;
pub use diff::create_message_diff;
pub use error::{EngineError, EngineResult};
pub use history::{make_edit, EditSkip};
pub use ignore::{EventKind, IgnoreEvaluator, IgnoreRule};
pub use logger::{ActionOutcome, DispatchReport, DispatchSummary, MessageLogger};
pub use lookups::SessionDirectory;
pub use presentation::{EditBody, MenuAction, MenuItem, MessageGroup, RenderedEdit};
pub use reconcile::{EvictReason, MessageOutcome, Reconciled, Reconciler};
pub use store::MessageStore;
