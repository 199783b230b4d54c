//! The two object-storage backends.
//!
//! Keys created by the two backends have incompatible shapes: the local
//! backend hands out bare object names, the cloud backend hands out full
//! public URLs. [`BackendId::classify`] is the single place this difference
//! is interpreted.

use bytes::Bytes;
use opendal::{Operator, services};

use super::config::{CloudStoreConfig, LocalStoreConfig};
use super::error::StorageError;

/// Identifies which backend owns a storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendId {
    /// Local S3-compatible store; keys are bare opaque tokens.
    Local,
    /// Public cloud blob store; keys are absolute URLs.
    Cloud,
}

impl BackendId {
    /// Classifies a stored key by its shape.
    ///
    /// A key is cloud-owned iff it is an absolute `http`/`https` URL. Every
    /// code path that inspects a key (download, delete) must go through this
    /// function so that records created under either backend stay routable
    /// after a migration leaves both key shapes in the same table.
    #[must_use]
    pub fn classify(key: &str) -> Self {
        if key.starts_with("http://") || key.starts_with("https://") {
            Self::Cloud
        } else {
            Self::Local
        }
    }

    /// Backend name for logs and configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Cloud => "cloud",
        }
    }
}

/// Returns the trailing path segment of a key.
///
/// Cloud providers address objects by name, not by full URL, so URL-shaped
/// keys are stripped to their last `/`-delimited component before delete.
pub(crate) fn object_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Local S3-compatible object store (MinIO).
pub struct LocalObjectStore {
    operator: Operator,
    endpoint: String,
    bucket: String,
}

impl LocalObjectStore {
    /// Create a local store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator cannot be initialized.
    pub fn from_config(config: &LocalStoreConfig) -> Result<Self, StorageError> {
        let builder = services::S3::default()
            .endpoint(&config.endpoint)
            .bucket(&config.bucket)
            .access_key_id(&config.access_key_id)
            .secret_access_key(&config.secret_access_key)
            .region(&config.region);

        let operator = Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        Ok(Self {
            operator,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_operator(operator: Operator, endpoint: &str, bucket: &str) -> Self {
        Self {
            operator,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
        }
    }

    /// Store a payload under the given object name.
    pub async fn store(
        &self,
        name: &str,
        payload: Bytes,
        mime_type: &str,
    ) -> Result<(), StorageError> {
        self.operator
            .write_with(name, payload)
            .content_type(mime_type)
            .await
            .map(|_| ())
            .map_err(StorageError::from)
    }

    /// Remove an object by name.
    pub async fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.operator.delete(name).await.map_err(StorageError::from)
    }

    /// Retrieval URL for a local key.
    ///
    /// The bucket is provisioned for anonymous read, so this is pure string
    /// composition; no provider call happens on the read path.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

/// Public cloud blob store (Azure Blob, public-read container).
pub struct CloudObjectStore {
    operator: Operator,
    account: String,
    container: String,
}

impl CloudObjectStore {
    /// Create a cloud store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator cannot be initialized.
    pub fn from_config(config: &CloudStoreConfig) -> Result<Self, StorageError> {
        let builder = services::Azblob::default()
            .account_name(&config.account)
            .account_key(&config.access_key)
            .container(&config.container);

        let operator = Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        Ok(Self {
            operator,
            account: config.account.clone(),
            container: config.container.clone(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_operator(operator: Operator, account: &str, container: &str) -> Self {
        Self {
            operator,
            account: account.to_string(),
            container: container.to_string(),
        }
    }

    /// Store a payload under the given object name.
    pub async fn store(
        &self,
        name: &str,
        payload: Bytes,
        mime_type: &str,
    ) -> Result<(), StorageError> {
        self.operator
            .write_with(name, payload)
            .content_type(mime_type)
            .await
            .map(|_| ())
            .map_err(StorageError::from)
    }

    /// Remove an object by name (not by URL).
    pub async fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.operator.delete(name).await.map_err(StorageError::from)
    }

    /// Public URL for an object name. Cloud keys *are* this URL.
    #[must_use]
    pub fn public_url(&self, name: &str) -> String {
        format!(
            "https://{}.blob.core.windows.net/{}/{}",
            self.account, self.container, name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bare_token_is_local() {
        assert_eq!(
            BackendId::classify("0a1b2c3d-e4f5-4678-9abc-def012345678.pdf"),
            BackendId::Local
        );
        assert_eq!(BackendId::classify("notes/readme.txt"), BackendId::Local);
        assert_eq!(BackendId::classify(""), BackendId::Local);
    }

    #[test]
    fn test_classify_url_is_cloud() {
        assert_eq!(
            BackendId::classify("https://acct.blob.core.windows.net/res/a.pdf"),
            BackendId::Cloud
        );
        assert_eq!(
            BackendId::classify("http://example.com/bucket/key"),
            BackendId::Cloud
        );
    }

    #[test]
    fn test_classify_scheme_must_lead() {
        // "https://" appearing mid-string does not make a key cloud-owned.
        assert_eq!(
            BackendId::classify("weird-https://-token"),
            BackendId::Local
        );
    }

    #[test]
    fn test_object_name_strips_url() {
        assert_eq!(
            object_name("https://acct.blob.core.windows.net/res/abc.pdf"),
            "abc.pdf"
        );
        assert_eq!(object_name("abc.pdf"), "abc.pdf");
        assert_eq!(object_name("a/b/c"), "c");
    }
}
