//! Key-shape routing across the two storage backends.

use bytes::Bytes;
use uuid::Uuid;

use super::backend::{BackendId, CloudObjectStore, LocalObjectStore, object_name};
use super::config::StorageConfig;
use super::error::StorageError;

/// Result of a completed upload.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Opaque storage key, shaped per the owning backend's convention.
    pub key: String,
    /// Declared MIME type of the payload.
    pub mime_type: String,
    /// Payload size in bytes.
    pub size_bytes: u64,
}

/// Routes storage operations to the backend that owns a key.
///
/// This is the only component aware that two backends exist. Ownership is
/// decided by [`BackendId::classify`] on the key's shape, so records created
/// under either backend remain routable indefinitely, including after a
/// migration leaves both key shapes in the same table.
pub struct StorageRouter {
    local: LocalObjectStore,
    cloud: Option<CloudObjectStore>,
    default_target: BackendId,
    max_file_size: u64,
    allowed_mime_types: Vec<String>,
}

impl StorageRouter {
    /// Create a router from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured backend cannot be initialized, or if
    /// the default upload target is the cloud backend but none is configured.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let local = LocalObjectStore::from_config(&config.local)?;
        let cloud = config
            .cloud
            .as_ref()
            .map(CloudObjectStore::from_config)
            .transpose()?;

        if config.default_target == BackendId::Cloud && cloud.is_none() {
            return Err(StorageError::configuration(
                "default upload target is 'cloud' but no cloud backend is configured",
            ));
        }

        Ok(Self {
            local,
            cloud,
            default_target: config.default_target,
            max_file_size: config.max_file_size,
            allowed_mime_types: config.allowed_mime_types,
        })
    }

    #[cfg(test)]
    pub(crate) fn for_tests(
        local: LocalObjectStore,
        cloud: Option<CloudObjectStore>,
        max_file_size: u64,
        allowed_mime_types: Vec<String>,
    ) -> Self {
        Self {
            local,
            cloud,
            default_target: BackendId::Local,
            max_file_size,
            allowed_mime_types,
        }
    }

    /// Validate a declared MIME type and payload size against configuration.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMediaType` or `PayloadTooLarge`; both are checked
    /// before any provider call.
    pub fn validate_upload(&self, mime_type: &str, size: u64) -> Result<(), StorageError> {
        if !self.allowed_mime_types.iter().any(|t| t == mime_type) {
            return Err(StorageError::unsupported_media_type(mime_type));
        }
        if size > self.max_file_size {
            return Err(StorageError::payload_too_large(size, self.max_file_size));
        }
        Ok(())
    }

    /// Upload a payload to the configured default backend.
    ///
    /// # Errors
    ///
    /// See [`Self::upload_to`].
    pub async fn upload(
        &self,
        payload: Bytes,
        mime_type: &str,
        filename: Option<&str>,
    ) -> Result<StoredObject, StorageError> {
        self.upload_to(self.default_target, payload, mime_type, filename)
            .await
    }

    /// Upload a payload to a specific backend.
    ///
    /// Generates a collision-resistant v4-UUID object name (preserving a safe
    /// original extension when present) and returns a key shaped per the
    /// target backend's convention: a bare token for local, a full public URL
    /// for cloud.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMediaType`/`PayloadTooLarge` before any provider
    /// call, `Configuration` if the target backend is not configured, and
    /// `Unavailable` if the provider cannot be reached.
    pub async fn upload_to(
        &self,
        target: BackendId,
        payload: Bytes,
        mime_type: &str,
        filename: Option<&str>,
    ) -> Result<StoredObject, StorageError> {
        let size = payload.len() as u64;
        self.validate_upload(mime_type, size)?;

        let name = generate_object_name(filename);

        let key = match target {
            BackendId::Local => {
                self.local.store(&name, payload, mime_type).await?;
                name
            }
            BackendId::Cloud => {
                let cloud = self.cloud_backend()?;
                cloud.store(&name, payload, mime_type).await?;
                cloud.public_url(&name)
            }
        };

        Ok(StoredObject {
            key,
            mime_type: mime_type.to_string(),
            size_bytes: size,
        })
    }

    /// Resolve the retrieval URL for a stored key.
    ///
    /// Pure string work on the hot read path: a cloud-owned key already is
    /// the URL and is returned unchanged; a local-owned key is combined with
    /// the configured endpoint and bucket.
    #[must_use]
    pub fn download_url(&self, key: &str) -> String {
        match BackendId::classify(key) {
            BackendId::Cloud => key.to_string(),
            BackendId::Local => self.local.public_url(key),
        }
    }

    /// Delete the payload behind a stored key.
    ///
    /// Cloud-owned keys are stripped to their trailing path segment before
    /// the provider's delete-by-name call; local-owned keys are deleted
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` on provider failure. Callers deleting an owning
    /// record treat this as a non-fatal warning (see `ResourceService`).
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match BackendId::classify(key) {
            BackendId::Local => self.local.remove(key).await,
            BackendId::Cloud => self.cloud_backend()?.remove(object_name(key)).await,
        }
    }

    fn cloud_backend(&self) -> Result<&CloudObjectStore, StorageError> {
        self.cloud
            .as_ref()
            .ok_or_else(|| StorageError::configuration("cloud backend is not configured"))
    }
}

/// Generate a unique object name, keeping a safe original extension.
fn generate_object_name(filename: Option<&str>) -> String {
    let id = Uuid::new_v4();
    match filename.and_then(extension_of) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Extract a lowercase ASCII-alphanumeric extension, if one exists.
fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opendal::{Operator, services};

    fn fs_operator() -> Operator {
        let root = std::env::temp_dir().join(format!("eduvault-storage-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&root).expect("create temp root");
        let builder = services::Fs::default().root(root.to_str().expect("utf-8 temp path"));
        Operator::new(builder).expect("fs operator").finish()
    }

    fn test_router() -> StorageRouter {
        let local =
            LocalObjectStore::with_operator(fs_operator(), "http://localhost:9000", "resources");
        let cloud = CloudObjectStore::with_operator(fs_operator(), "eduvaultdev", "resources");
        StorageRouter::for_tests(
            local,
            Some(cloud),
            1024 * 1024,
            vec!["application/pdf".to_string(), "image/png".to_string()],
        )
    }

    #[test]
    fn test_validate_upload_rejects_mime() {
        let router = test_router();
        let err = router
            .validate_upload("application/x-evil", 100)
            .unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedMediaType { .. }));
    }

    #[test]
    fn test_validate_upload_rejects_size() {
        let router = test_router();
        let err = router
            .validate_upload("application/pdf", 2 * 1024 * 1024)
            .unwrap_err();
        assert!(matches!(err, StorageError::PayloadTooLarge { .. }));
    }

    #[tokio::test]
    async fn test_upload_local_returns_bare_token() {
        let router = test_router();
        let stored = router
            .upload_to(
                BackendId::Local,
                Bytes::from_static(b"%PDF-1.4"),
                "application/pdf",
                Some("syllabus.pdf"),
            )
            .await
            .expect("upload should succeed");

        assert_eq!(BackendId::classify(&stored.key), BackendId::Local);
        assert!(stored.key.ends_with(".pdf"));
        assert_eq!(stored.size_bytes, 8);
        assert_eq!(
            router.download_url(&stored.key),
            format!("http://localhost:9000/resources/{}", stored.key)
        );
    }

    #[tokio::test]
    async fn test_upload_cloud_returns_url_key() {
        let router = test_router();
        let stored = router
            .upload_to(
                BackendId::Cloud,
                Bytes::from_static(b"\x89PNG"),
                "image/png",
                Some("diagram.png"),
            )
            .await
            .expect("upload should succeed");

        assert_eq!(BackendId::classify(&stored.key), BackendId::Cloud);
        assert!(
            stored
                .key
                .starts_with("https://eduvaultdev.blob.core.windows.net/resources/")
        );
        // Cloud key is already the retrieval URL.
        assert_eq!(router.download_url(&stored.key), stored.key);
    }

    #[tokio::test]
    async fn test_delete_routes_by_key_shape() {
        let router = test_router();

        let local = router
            .upload_to(
                BackendId::Local,
                Bytes::from_static(b"x"),
                "application/pdf",
                None,
            )
            .await
            .expect("local upload");
        router.delete(&local.key).await.expect("local delete");

        let cloud = router
            .upload_to(
                BackendId::Cloud,
                Bytes::from_static(b"y"),
                "application/pdf",
                None,
            )
            .await
            .expect("cloud upload");
        // URL-shaped key must be stripped to its object name before delete.
        router.delete(&cloud.key).await.expect("cloud delete");
    }

    #[tokio::test]
    async fn test_upload_cloud_without_backend_fails() {
        let local =
            LocalObjectStore::with_operator(fs_operator(), "http://localhost:9000", "resources");
        let router = StorageRouter::for_tests(
            local,
            None,
            1024,
            vec!["application/pdf".to_string()],
        );

        let err = router
            .upload_to(
                BackendId::Cloud,
                Bytes::from_static(b"x"),
                "application/pdf",
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Configuration(_)));
    }

    #[test]
    fn test_generate_object_name_extension_handling() {
        assert!(generate_object_name(Some("report.PDF")).ends_with(".pdf"));
        assert!(generate_object_name(Some("archive.tar.gz")).ends_with(".gz"));
        // No extension, hidden files, or unsafe extensions fall back to bare UUIDs.
        assert!(!generate_object_name(Some("README")).contains('.'));
        assert!(!generate_object_name(Some("evil.exe!!")).contains('.'));
        assert!(!generate_object_name(None).contains('.'));
    }

    #[test]
    fn test_object_names_are_unique() {
        let a = generate_object_name(Some("a.pdf"));
        let b = generate_object_name(Some("a.pdf"));
        assert_ne!(a, b);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Generated object names are always local-shaped: routing a fresh local
    // upload must never classify as cloud.
    proptest! {
        #[test]
        fn prop_generated_names_classify_local(filename in "[a-zA-Z0-9._ -]{0,40}") {
            let name = generate_object_name(Some(&filename));
            prop_assert_eq!(BackendId::classify(&name), BackendId::Local);
        }
    }

    proptest! {
        #[test]
        fn prop_extension_is_safe(filename in ".*") {
            if let Some(ext) = extension_of(&filename) {
                prop_assert!(!ext.is_empty());
                prop_assert!(ext.len() <= 10);
                prop_assert!(ext.chars().all(|c| c.is_ascii_alphanumeric()));
            }
        }
    }
}
