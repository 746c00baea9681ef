//! Message lifecycle events delivered by the host dispatcher

mod lifecycle;

pub use lifecycle::{
    DeleteRequest, DeleteTarget, LifecycleEvent, MessageDeleteBulkEvent, MessageDeleteEvent,
    MessageUpdate, MessageUpdateEvent,
};
