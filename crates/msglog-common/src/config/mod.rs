//! Logger configuration

mod id_list;
mod logger_config;
mod source;

pub use id_list::IdList;
pub use logger_config::{ConfigError, DeleteStyle, LoggerSettings, OptionValue};
pub use source::{SettingsSource, SharedSettings};
