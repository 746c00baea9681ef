//! Engine error types

use msglog_core::{DomainError, Snowflake};
use std::fmt;

/// Engine error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The cache refused a change to one message
    Cache {
        message_id: Snowflake,
        source: DomainError,
    },

    /// Resource not found
    NotFound { resource: &'static str, id: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cache { message_id, source } => {
                write!(f, "Cache rejected change to message {message_id}: {source}")
            }
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cache { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

impl EngineError {
    /// Create a cache error for one message
    pub fn cache(message_id: Snowflake, source: DomainError) -> Self {
        Self::Cache { message_id, source }
    }

    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Get the error code for logs and host surfaces
    pub fn error_code(&self) -> &str {
        match self {
            Self::Cache { source, .. } => source.code(),
            Self::NotFound { .. } => "NOT_FOUND",
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
