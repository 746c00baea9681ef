//! Engine context - dependency container for the reconciler
//!
//! Holds the host lookups and the settings source. Cloning is cheap.

use std::sync::Arc;

use msglog_common::{LoggerSettings, SettingsSource};
use msglog_core::{ChannelLookup, MessageSubject, UserLookup};

use crate::ignore::{EventKind, IgnoreEvaluator, IgnoreRule};

#[derive(Clone)]
pub struct EngineContext {
    users: Arc<dyn UserLookup>,
    channels: Arc<dyn ChannelLookup>,
    settings: Arc<dyn SettingsSource>,
}

impl EngineContext {
    pub fn new(
        users: Arc<dyn UserLookup>,
        channels: Arc<dyn ChannelLookup>,
        settings: Arc<dyn SettingsSource>,
    ) -> Self {
        Self {
            users,
            channels,
            settings,
        }
    }

    /// Get the current user lookup
    pub fn users(&self) -> &dyn UserLookup {
        self.users.as_ref()
    }

    /// Get the channel metadata lookup
    pub fn channels(&self) -> &dyn ChannelLookup {
        self.channels.as_ref()
    }

    /// Snapshot of the settings at this instant
    pub fn settings(&self) -> Arc<LoggerSettings> {
        self.settings.snapshot()
    }

    /// Evaluator bound to one settings snapshot
    pub fn evaluator<'a>(&'a self, settings: &'a LoggerSettings) -> IgnoreEvaluator<'a> {
        IgnoreEvaluator::new(settings, self.users(), self.channels())
    }

    pub fn should_ignore<M>(&self, message: &M, kind: EventKind) -> bool
    where
        M: MessageSubject + ?Sized,
    {
        self.ignore_rule(message, kind).is_some()
    }

    pub fn ignore_rule<M>(&self, message: &M, kind: EventKind) -> Option<IgnoreRule>
    where
        M: MessageSubject + ?Sized,
    {
        let settings = self.settings();
        self.evaluator(&settings).matching_rule(message, kind)
    }
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("settings", &self.settings.snapshot())
            .finish_non_exhaustive()
    }
}
