//! Message flag bits as delivered by the host gateway
//!
//! Only `EPHEMERAL` drives reconciliation; the rest are kept so a record's
//! flags survive a round trip through serde unchanged.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Discord-like message flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MessageFlags: u64 {
        /// Message has been published to following channels
        const CROSSPOSTED            = 1 << 0;
        /// Message originated from a followed channel
        const IS_CROSSPOST           = 1 << 1;
        /// Embeds are hidden
        const SUPPRESS_EMBEDS        = 1 << 2;
        /// Source of a crosspost was deleted
        const SOURCE_MESSAGE_DELETED = 1 << 3;
        /// Urgent system message
        const URGENT                 = 1 << 4;
        /// Message has an associated thread
        const HAS_THREAD             = 1 << 5;
        /// Only visible to the invoking user; never persisted or tombstoned
        const EPHEMERAL              = 1 << 6;
        /// Interaction response still loading
        const LOADING                = 1 << 7;
    }
}

impl MessageFlags {
    /// Check if the ephemeral bit is set
    #[inline]
    pub fn is_ephemeral(self) -> bool {
        self.contains(Self::EPHEMERAL)
    }
}

// Unknown bits are retained so newer host flags are not silently dropped
impl Serialize for MessageFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u64::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}
