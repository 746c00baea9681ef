//! Settings sources
//!
//! The engine reads a fresh snapshot per event, so toggles flipped in the
//! settings UI apply to the next event without rebuilding anything.

use parking_lot::RwLock;
use std::sync::Arc;

use super::logger_config::LoggerSettings;

/// Supplies the settings in force right now
pub trait SettingsSource: Send + Sync {
    fn snapshot(&self) -> Arc<LoggerSettings>;
}

impl SettingsSource for LoggerSettings {
    fn snapshot(&self) -> Arc<LoggerSettings> {
        Arc::new(self.clone())
    }
}

/// Settings shared with a settings UI that may change them at any time
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<Arc<LoggerSettings>>>,
}

impl SharedSettings {
    pub fn new(settings: LoggerSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(settings))),
        }
    }

    /// Apply a change; readers holding an older snapshot keep it
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut LoggerSettings),
    {
        let mut guard = self.inner.write();
        let mut next = LoggerSettings::clone(&guard);
        f(&mut next);
        *guard = Arc::new(next);
    }

    pub fn replace(&self, settings: LoggerSettings) {
        *self.inner.write() = Arc::new(settings);
    }
}

impl SettingsSource for SharedSettings {
    fn snapshot(&self) -> Arc<LoggerSettings> {
        Arc::clone(&*self.inner.read())
    }
}
