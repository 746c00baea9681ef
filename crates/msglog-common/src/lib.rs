//! # msglog-common
//!
//! Shared utilities: logger settings and telemetry.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    ConfigError, DeleteStyle, IdList, LoggerSettings, OptionValue, SettingsSource,
    SharedSettings,
};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
