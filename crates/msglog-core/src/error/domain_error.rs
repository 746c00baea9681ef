//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Result type for domain operations and host lookups
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Lookup Errors
    // =========================================================================
    #[error("Lookup source unavailable: {0}")]
    LookupUnavailable(&'static str),

    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    // =========================================================================
    // Cache Errors
    // =========================================================================
    #[error("Message not found in cache: {0}")]
    MessageNotFound(Snowflake),

    #[error("Cache error: {0}")]
    CacheError(String),
}

impl DomainError {
    /// Get a stable error code string for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::LookupUnavailable(_) => "LOOKUP_UNAVAILABLE",
            Self::LookupFailed(_) => "LOOKUP_FAILED",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::CacheError(_) => "CACHE_ERROR",
        }
    }

    /// Check if this is a lookup failure (recovered locally by callers)
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::LookupUnavailable(_) | Self::LookupFailed(_))
    }

    /// Check if this is a cache failure
    pub fn is_cache(&self) -> bool {
        matches!(self, Self::MessageNotFound(_) | Self::CacheError(_))
    }
}
