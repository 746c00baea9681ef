//! Value objects - immutable types that represent domain concepts

mod message_flags;
mod snowflake;

pub use message_flags::MessageFlags;
pub use snowflake::{Snowflake, SnowflakeParseError};
