//! Storage configuration types.

use serde::{Deserialize, Serialize};

use super::backend::BackendId;

/// Local S3-compatible backend configuration (MinIO).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStoreConfig {
    /// Endpoint URL, e.g. `http://localhost:9000`.
    pub endpoint: String,
    /// Bucket name. Must be provisioned for anonymous read so download URLs
    /// can be synthesized without a provider call.
    pub bucket: String,
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Region.
    pub region: String,
}

/// Cloud blob store configuration (Azure Blob, public-read container).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudStoreConfig {
    /// Storage account name.
    pub account: String,
    /// Storage access key.
    pub access_key: String,
    /// Container name.
    pub container: String,
}

/// Storage subsystem configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Local backend, always configured.
    pub local: LocalStoreConfig,
    /// Cloud backend, optional.
    pub cloud: Option<CloudStoreConfig>,
    /// Backend that receives new uploads.
    pub default_target: BackendId,
    /// Maximum payload size in bytes.
    pub max_file_size: u64,
    /// Allowed MIME types for upload.
    pub allowed_mime_types: Vec<String>,
}

impl StorageConfig {
    /// Default max payload size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(local: LocalStoreConfig) -> Self {
        Self {
            local,
            cloud: None,
            default_target: BackendId::Local,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: Self::default_mime_types(),
        }
    }

    /// Set the cloud backend.
    #[must_use]
    pub fn with_cloud(mut self, cloud: CloudStoreConfig) -> Self {
        self.cloud = Some(cloud);
        self
    }

    /// Set the backend new uploads go to.
    #[must_use]
    pub fn with_default_target(mut self, target: BackendId) -> Self {
        self.default_target = target;
        self
    }

    /// Set maximum payload size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set allowed MIME types.
    #[must_use]
    pub fn with_allowed_mime_types(mut self, types: Vec<String>) -> Self {
        self.allowed_mime_types = types;
        self
    }

    /// Default allowed MIME types for resource uploads.
    #[must_use]
    pub fn default_mime_types() -> Vec<String> {
        vec![
            // Documents
            "application/pdf".to_string(),
            "application/msword".to_string(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string(),
            "application/vnd.ms-powerpoint".to_string(),
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
                .to_string(),
            "text/plain".to_string(),
            // Images
            "image/png".to_string(),
            "image/jpeg".to_string(),
            "image/gif".to_string(),
            "image/webp".to_string(),
            // Media
            "video/mp4".to_string(),
            "audio/mpeg".to_string(),
        ]
    }

    /// Check if a MIME type is allowed.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|t| t == mime_type)
    }
}
