//! Domain entities - message records and the metadata the engine consults

mod channel;
mod channel_messages;
mod diff;
mod message;
mod user;

pub use channel::ChannelInfo;
pub use channel_messages::ChannelMessages;
pub use diff::{DiffKind, DiffPart};
pub use message::{Attachment, Author, EditEntry, MessageRecord};
pub use user::CurrentUser;
