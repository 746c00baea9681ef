//! Session lookups
//!
//! Both lookups are best-effort. `Err` means the source could not be reached,
//! `Ok(None)` means it answered but knows nothing about the key. Callers treat
//! the two the same way: the dependent rule does not match.

use crate::entities::{ChannelInfo, CurrentUser};
use crate::error::DomainResult;
use crate::value_objects::Snowflake;

/// Resolves the logged-in user
pub trait UserLookup: Send + Sync {
    fn current_user(&self) -> DomainResult<Option<CurrentUser>>;
}

/// Resolves channel metadata (parent category, guild)
pub trait ChannelLookup: Send + Sync {
    fn channel(&self, channel_id: Snowflake) -> DomainResult<Option<ChannelInfo>>;
}
