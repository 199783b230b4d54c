//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Payload size exceeds maximum allowed.
    #[error("payload size {size} bytes exceeds maximum allowed {max} bytes")]
    PayloadTooLarge {
        /// Actual payload size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// MIME type not allow-listed.
    #[error("MIME type '{mime_type}' is not allowed")]
    UnsupportedMediaType {
        /// The rejected MIME type.
        mime_type: String,
    },

    /// Object not found in storage.
    #[error("object not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// Provider could not be reached or failed transiently; safe to retry.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Create a payload too large error.
    #[must_use]
    pub fn payload_too_large(size: u64, max: u64) -> Self {
        Self::PayloadTooLarge { size, max }
    }

    /// Create an unsupported media type error.
    #[must_use]
    pub fn unsupported_media_type(mime_type: impl Into<String>) -> Self {
        Self::UnsupportedMediaType {
            mime_type: mime_type.into(),
        }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

impl From<StorageError> for eduvault_shared::AppError {
    fn from(err: StorageError) -> Self {
        let msg = err.to_string();
        match err {
            StorageError::PayloadTooLarge { .. } => Self::PayloadTooLarge(msg),
            StorageError::UnsupportedMediaType { .. } => Self::UnsupportedMediaType(msg),
            StorageError::NotFound { .. } => Self::NotFound(msg),
            StorageError::Configuration(_) | StorageError::Unavailable(_) => {
                Self::BackendUnavailable(msg)
            }
        }
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            opendal::ErrorKind::ConfigInvalid => Self::Configuration(err.to_string()),
            _ => Self::Unavailable(err.to_string()),
        }
    }
}
