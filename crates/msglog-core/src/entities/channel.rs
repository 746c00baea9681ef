//! Channel metadata as resolved from the host's channel store

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// The subset of channel metadata the ignore rules consult
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: Snowflake,
    /// Parent category, if the channel is nested under one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Snowflake>,
    /// Owning guild; `None` for direct messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
}

impl ChannelInfo {
    /// Create metadata for a guild channel
    pub fn guild_channel(id: Snowflake, guild_id: Snowflake, parent_id: Option<Snowflake>) -> Self {
        Self {
            id,
            parent_id,
            guild_id: Some(guild_id),
        }
    }

    /// Create metadata for a DM channel
    pub fn dm(id: Snowflake) -> Self {
        Self {
            id,
            parent_id: None,
            guild_id: None,
        }
    }

    /// Check if this is a DM channel
    #[inline]
    pub fn is_dm(&self) -> bool {
        self.guild_id.is_none()
    }
}
