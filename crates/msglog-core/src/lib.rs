//! # msglog-core
//!
//! Domain layer containing message records, value objects, lifecycle events,
//! and the traits the reconciliation engine consumes from its host.
//! This crate has no dependencies on logging, configuration, or storage.

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Attachment, Author, ChannelInfo, ChannelMessages, CurrentUser, DiffKind, DiffPart, EditEntry,
    MessageRecord,
};
pub use error::{DomainError, DomainResult};
pub use events::{
    DeleteRequest, DeleteTarget, LifecycleEvent, MessageDeleteBulkEvent, MessageDeleteEvent,
    MessageUpdate, MessageUpdateEvent,
};
pub use traits::{ChannelLookup, MessageCache, MessageSubject, UserLookup};
pub use value_objects::{MessageFlags, Snowflake, SnowflakeParseError};
