//! The message-shaped view the ignore rules evaluate

use crate::entities::MessageRecord;
use crate::events::MessageUpdate;
use crate::value_objects::Snowflake;

/// Anything the ignore rules can be evaluated against
///
/// Partial gateway payloads may lack an author; rules that need one then
/// simply do not match.
pub trait MessageSubject {
    fn author_id(&self) -> Option<Snowflake>;
    fn is_bot_author(&self) -> bool;
    fn channel_id(&self) -> Snowflake;
}

impl MessageSubject for MessageRecord {
    fn author_id(&self) -> Option<Snowflake> {
        Some(self.author.id)
    }

    fn is_bot_author(&self) -> bool {
        self.author.bot
    }

    fn channel_id(&self) -> Snowflake {
        self.channel_id
    }
}

impl MessageSubject for MessageUpdate {
    fn author_id(&self) -> Option<Snowflake> {
        self.author.as_ref().map(|a| a.id)
    }

    fn is_bot_author(&self) -> bool {
        self.author.as_ref().is_some_and(|a| a.bot)
    }

    fn channel_id(&self) -> Snowflake {
        self.channel_id
    }
}
