//! Resource error types.

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// Resource operation errors.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Resource not found, or hidden from the caller by policy.
    #[error("resource not found: {0}")]
    NotFound(Uuid),

    /// Visibility or ownership denial for an authenticated caller.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Operation requires an authenticated actor.
    #[error("authentication required: {0}")]
    Unauthorized(String),

    /// Malformed or mutually-inconsistent fields; rejected before any side
    /// effect.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Operation does not apply to the resource's kind.
    #[error("not applicable: {0}")]
    NotApplicable(String),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl From<ResourceError> for eduvault_shared::AppError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound(_) => Self::NotFound("resource not found".to_string()),
            ResourceError::Forbidden(msg) => Self::Forbidden(msg),
            ResourceError::Unauthorized(msg) => Self::Unauthorized(msg),
            ResourceError::Validation(msg) => Self::Validation(msg),
            ResourceError::NotApplicable(msg) => Self::NotApplicable(msg),
            ResourceError::Storage(storage_err) => storage_err.into(),
            ResourceError::Repository(msg) => Self::Database(msg),
        }
    }
}

impl ResourceError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a forbidden error.
    #[must_use]
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
