//! Ports - the interfaces the engine consumes from its host

mod cache;
mod lookups;
mod subject;

pub use cache::MessageCache;
pub use lookups::{ChannelLookup, UserLookup};
pub use subject::MessageSubject;
