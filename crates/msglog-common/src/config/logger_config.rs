//! Logger settings
//!
//! Loaded from an optional TOML file layered under `MESSAGE_LOGGER_*`
//! environment variables (a `.env` file is honored). Every option has a
//! default, so an empty environment yields a working configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::id_list::IdList;

/// Prefix of environment variables read by [`LoggerSettings::load`]
pub const ENV_PREFIX: &str = "MESSAGE_LOGGER";

/// User-facing logger options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Do not preserve messages from bot accounts
    #[serde(default)]
    pub ignore_bots: bool,
    /// Do not preserve the current user's own messages
    #[serde(default)]
    pub ignore_self: bool,
    #[serde(default)]
    pub ignore_users: IdList,
    /// Channel ids or parent category ids
    #[serde(default)]
    pub ignore_channels: IdList,
    #[serde(default)]
    pub ignore_guilds: IdList,
    #[serde(default = "default_true")]
    pub log_edits: bool,
    #[serde(default = "default_true")]
    pub log_deletes: bool,
    #[serde(default = "default_true")]
    pub show_edit_diffs: bool,
    #[serde(default = "default_true")]
    pub inline_edits: bool,
    #[serde(default)]
    pub collapse_deleted: bool,
    #[serde(default)]
    pub delete_style: DeleteStyle,
}

/// How tombstoned messages are styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeleteStyle {
    /// Tinted text
    #[default]
    Text,
    /// Tinted background overlay
    Overlay,
}

impl DeleteStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Overlay => "overlay",
        }
    }
}

impl fmt::Display for DeleteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeleteStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "overlay" => Ok(Self::Overlay),
            other => Err(ConfigError::InvalidValue("deleteStyle", other.to_string())),
        }
    }
}

/// A single option value, as returned by [`LoggerSettings::option`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(_) => None,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            ignore_bots: false,
            ignore_self: false,
            ignore_users: IdList::default(),
            ignore_channels: IdList::default(),
            ignore_guilds: IdList::default(),
            log_edits: default_true(),
            log_deletes: default_true(),
            show_edit_diffs: default_true(),
            inline_edits: default_true(),
            collapse_deleted: false,
            delete_style: DeleteStyle::default(),
        }
    }
}

impl LoggerSettings {
    /// Load settings from `MESSAGE_LOGGER_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load settings from an optional TOML file, overridden by the environment
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or a value has the wrong type
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));

        builder
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Look up an option by its settings-UI name (`ignoreBots`, `deleteStyle`, ...)
    pub fn option(&self, name: &str) -> Option<OptionValue> {
        let value = match name {
            "ignoreBots" => OptionValue::Bool(self.ignore_bots),
            "ignoreSelf" => OptionValue::Bool(self.ignore_self),
            "ignoreUsers" => OptionValue::Text(self.ignore_users.to_string()),
            "ignoreChannels" => OptionValue::Text(self.ignore_channels.to_string()),
            "ignoreGuilds" => OptionValue::Text(self.ignore_guilds.to_string()),
            "logEdits" => OptionValue::Bool(self.log_edits),
            "logDeletes" => OptionValue::Bool(self.log_deletes),
            "showEditDiffs" => OptionValue::Bool(self.show_edit_diffs),
            "inlineEdits" => OptionValue::Bool(self.inline_edits),
            "collapseDeleted" => OptionValue::Bool(self.collapse_deleted),
            "deleteStyle" => OptionValue::Text(self.delete_style.to_string()),
            _ => return None,
        };
        Some(value)
    }

    /// Set an option from its settings-UI name and raw string value
    pub fn set_option(&mut self, name: &str, raw: &str) -> Result<(), ConfigError> {
        match name {
            "ignoreBots" => self.ignore_bots = parse_bool(name, raw)?,
            "ignoreSelf" => self.ignore_self = parse_bool(name, raw)?,
            "ignoreUsers" => self.ignore_users = IdList::parse(raw),
            "ignoreChannels" => self.ignore_channels = IdList::parse(raw),
            "ignoreGuilds" => self.ignore_guilds = IdList::parse(raw),
            "logEdits" => self.log_edits = parse_bool(name, raw)?,
            "logDeletes" => self.log_deletes = parse_bool(name, raw)?,
            "showEditDiffs" => self.show_edit_diffs = parse_bool(name, raw)?,
            "inlineEdits" => self.inline_edits = parse_bool(name, raw)?,
            "collapseDeleted" => self.collapse_deleted = parse_bool(name, raw)?,
            "deleteStyle" => self.delete_style = raw.parse()?,
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidOption {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid value for option {name}: {value}")]
    InvalidOption { name: String, value: String },

    #[error("Unknown option: {0}")]
    UnknownOption(String),
}
