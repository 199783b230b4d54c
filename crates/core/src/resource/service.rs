//! Resource service implementation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use eduvault_shared::{Actor, PageRequest};

use super::error::ResourceError;
use super::policy;
use super::types::{
    CreateResource, DownloadOutcome, Metric, NewContent, NewResource, Resource, ResourceContent,
    ResourceFilter, ResourceUpdate, UploadContent, VisibilityScope,
};
use crate::storage::StorageRouter;

/// Repository trait for resource persistence.
///
/// Implemented by the db crate. `increment` must be an atomic column-level
/// increment at the storage layer, never a read-modify-write, so concurrent
/// callers always net exactly one count each.
pub trait ResourceRepository: Send + Sync {
    /// Insert a new record with zeroed counters.
    fn insert(
        &self,
        input: NewResource,
    ) -> impl std::future::Future<Output = Result<Resource, ResourceError>> + Send;

    /// Find a record by id.
    fn find_by_id(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Resource>, ResourceError>> + Send;

    /// List records in the given visibility scope, newest first, paginated.
    /// Returns the page plus the total match count.
    fn list(
        &self,
        scope: VisibilityScope,
        filter: ResourceFilter,
        page: PageRequest,
    ) -> impl std::future::Future<Output = Result<(Vec<Resource>, u64), ResourceError>> + Send;

    /// Apply a metadata patch; returns the updated record, `None` if absent.
    fn apply_update(
        &self,
        id: Uuid,
        patch: ResourceUpdate,
    ) -> impl std::future::Future<Output = Result<Option<Resource>, ResourceError>> + Send;

    /// Delete a record; returns whether a row was removed.
    fn delete(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<bool, ResourceError>> + Send;

    /// Atomically increment one metric; returns the updated record, `None`
    /// if absent.
    fn increment(
        &self,
        id: Uuid,
        metric: Metric,
    ) -> impl std::future::Future<Output = Result<Option<Resource>, ResourceError>> + Send;
}

/// Orchestrates resource operations against the repository, the storage
/// router, and the visibility policy.
///
/// This is the sole entry point used by the HTTP layer. Every operation
/// checks policy before touching data; upload-before-insert and
/// delete-payload-before-delete-record are the only cross-store ordering
/// guarantees.
pub struct ResourceService<R: ResourceRepository> {
    storage: Arc<StorageRouter>,
    repo: Arc<R>,
}

impl<R: ResourceRepository> ResourceService<R> {
    /// Create a new resource service.
    #[must_use]
    pub fn new(storage: Arc<StorageRouter>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// Create a resource.
    ///
    /// Validates all invariants before any side effect. For uploads the
    /// payload is stored first; if the upload fails no row is written, and
    /// if the insert fails afterwards the payload is best-effort removed.
    ///
    /// # Errors
    ///
    /// Returns `Validation`, `Storage` (media type, size, or provider
    /// failure), or `Repository`.
    pub async fn create(
        &self,
        input: CreateResource,
        author: &Actor,
    ) -> Result<Resource, ResourceError> {
        input.validate()?;

        let content = match input.content {
            NewContent::Upload {
                payload,
                mime_type,
                filename,
            } => {
                let stored = self
                    .storage
                    .upload(payload, &mime_type, filename.as_deref())
                    .await?;
                ResourceContent::Upload(UploadContent {
                    storage_key: stored.key,
                    mime_type: stored.mime_type,
                    size_bytes: i64::try_from(stored.size_bytes).unwrap_or(i64::MAX),
                })
            }
            NewContent::Url { external_url } => ResourceContent::Url { external_url },
            NewContent::Note { markdown_content } => ResourceContent::Note { markdown_content },
        };

        let record = NewResource {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            visibility: input.visibility,
            is_featured: input.is_featured,
            author_id: author.id,
            content,
            created_at: Utc::now(),
        };

        let storage_key = match &record.content {
            ResourceContent::Upload(upload) => Some(upload.storage_key.clone()),
            _ => None,
        };

        match self.repo.insert(record).await {
            Ok(resource) => {
                info!(resource_id = %resource.id, kind = resource.kind().as_str(), "Resource created");
                Ok(resource)
            }
            Err(e) => {
                // The payload was stored before the insert; remove it so the
                // failed create leaves nothing behind.
                if let Some(key) = storage_key {
                    if let Err(del_err) = self.storage.delete(&key).await {
                        warn!(storage_key = %key, error = %del_err, "Failed to clean up payload after insert failure");
                    }
                }
                Err(e)
            }
        }
    }

    /// Fetch a resource, counting the view.
    ///
    /// # Errors
    ///
    /// `NotFound` for absent ids and for private records requested without
    /// authentication (existence hiding); `Forbidden` for authenticated
    /// callers the policy denies.
    pub async fn get(&self, id: Uuid, actor: Option<&Actor>) -> Result<Resource, ResourceError> {
        let resource = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ResourceError::NotFound(id))?;

        if !policy::can_read(actor, resource.visibility, resource.author_id) {
            return Err(read_denial(id, actor));
        }

        self.repo
            .increment(id, Metric::Views)
            .await?
            .ok_or(ResourceError::NotFound(id))
    }

    /// List resources the actor may read, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Repository` on persistence failure.
    pub async fn list(
        &self,
        filter: ResourceFilter,
        page: PageRequest,
        actor: Option<&Actor>,
    ) -> Result<(Vec<Resource>, u64), ResourceError> {
        self.repo
            .list(policy::read_scope(actor), filter, page)
            .await
    }

    /// Resolve a download for a resource.
    ///
    /// Uploads count the download and resolve the storage URL; url resources
    /// return the external URL verbatim with no counter change; notes have
    /// nothing to download.
    ///
    /// # Errors
    ///
    /// Read denial as in [`Self::get`]; `NotApplicable` for notes.
    pub async fn download(
        &self,
        id: Uuid,
        actor: Option<&Actor>,
    ) -> Result<DownloadOutcome, ResourceError> {
        let resource = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ResourceError::NotFound(id))?;

        if !policy::can_read(actor, resource.visibility, resource.author_id) {
            return Err(read_denial(id, actor));
        }

        match &resource.content {
            ResourceContent::Upload(upload) => {
                let updated = self
                    .repo
                    .increment(id, Metric::Downloads)
                    .await?
                    .ok_or(ResourceError::NotFound(id))?;
                Ok(DownloadOutcome {
                    url: self.storage.download_url(&upload.storage_key),
                    download_count: updated.metrics.downloads,
                })
            }
            ResourceContent::Url { external_url } => Ok(DownloadOutcome {
                url: external_url.clone(),
                download_count: resource.metrics.downloads,
            }),
            ResourceContent::Note { .. } => Err(ResourceError::NotApplicable(
                "note resources have no downloadable payload".to_string(),
            )),
        }
    }

    /// Like a resource. Raw counter: repeat likes by the same actor count
    /// again.
    ///
    /// # Errors
    ///
    /// Read denial as in [`Self::get`] (authentication is enforced by the
    /// `Actor` parameter).
    pub async fn like(&self, id: Uuid, actor: &Actor) -> Result<Resource, ResourceError> {
        let resource = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ResourceError::NotFound(id))?;

        if !policy::can_read(Some(actor), resource.visibility, resource.author_id) {
            return Err(ResourceError::forbidden("cannot like a private resource"));
        }

        self.repo
            .increment(id, Metric::Likes)
            .await?
            .ok_or(ResourceError::NotFound(id))
    }

    /// Patch resource metadata. Never changes the kind or the author.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Forbidden` (author or moderation tier required), or
    /// `Validation` for kind-inconsistent fields.
    pub async fn update(
        &self,
        id: Uuid,
        patch: ResourceUpdate,
        actor: &Actor,
    ) -> Result<Resource, ResourceError> {
        let resource = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ResourceError::NotFound(id))?;

        if !policy::can_write(actor, resource.author_id) {
            return Err(ResourceError::forbidden(
                "only the author or a coordinator may edit this resource",
            ));
        }

        patch.validate_for_kind(resource.kind())?;

        self.repo
            .apply_update(id, patch)
            .await?
            .ok_or(ResourceError::NotFound(id))
    }

    /// Delete a resource permanently.
    ///
    /// For uploads the backend payload is removed first. A payload-delete
    /// failure is logged and the row deletion proceeds: an orphaned payload
    /// is a bounded inconsistency, a record pointing at a missing payload is
    /// not.
    ///
    /// # Errors
    ///
    /// `NotFound` or `Forbidden`.
    pub async fn delete(&self, id: Uuid, actor: &Actor) -> Result<(), ResourceError> {
        let resource = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ResourceError::NotFound(id))?;

        if !policy::can_write(actor, resource.author_id) {
            return Err(ResourceError::forbidden(
                "only the author or a coordinator may delete this resource",
            ));
        }

        if let ResourceContent::Upload(upload) = &resource.content {
            if let Err(e) = self.storage.delete(&upload.storage_key).await {
                warn!(
                    resource_id = %id,
                    storage_key = %upload.storage_key,
                    error = %e,
                    "Payload delete failed; record deletion proceeds"
                );
            }
        }

        self.repo.delete(id).await?;
        info!(resource_id = %id, "Resource deleted");
        Ok(())
    }
}

/// Denial shape for failed reads: private records present as absent to
/// unauthenticated callers so their existence is not leaked.
fn read_denial(id: Uuid, actor: Option<&Actor>) -> ResourceError {
    match actor {
        None => ResourceError::NotFound(id),
        Some(_) => ResourceError::forbidden("access denied to private resource"),
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::{Metrics, ResourceKind, Visibility};
    use super::*;
    use crate::storage::{LocalObjectStore, StorageRouter};
    use bytes::Bytes;
    use eduvault_shared::Role;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock repository for testing.
    struct MockResourceRepository {
        resources: Mutex<HashMap<Uuid, Resource>>,
        fail_inserts: bool,
    }

    impl MockResourceRepository {
        fn new() -> Self {
            Self {
                resources: Mutex::new(HashMap::new()),
                fail_inserts: false,
            }
        }

        fn failing_inserts() -> Self {
            Self {
                resources: Mutex::new(HashMap::new()),
                fail_inserts: true,
            }
        }
    }

    impl ResourceRepository for MockResourceRepository {
        async fn insert(&self, input: NewResource) -> Result<Resource, ResourceError> {
            if self.fail_inserts {
                return Err(ResourceError::repository("insert failed"));
            }
            let resource = Resource {
                id: input.id,
                title: input.title,
                description: input.description,
                visibility: input.visibility,
                is_featured: input.is_featured,
                author_id: input.author_id,
                content: input.content,
                metrics: Metrics::default(),
                created_at: input.created_at,
            };
            self.resources
                .lock()
                .unwrap()
                .insert(resource.id, resource.clone());
            Ok(resource)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, ResourceError> {
            Ok(self.resources.lock().unwrap().get(&id).cloned())
        }

        async fn list(
            &self,
            scope: VisibilityScope,
            filter: ResourceFilter,
            page: PageRequest,
        ) -> Result<(Vec<Resource>, u64), ResourceError> {
            let mut items: Vec<Resource> = self
                .resources
                .lock()
                .unwrap()
                .values()
                .filter(|r| match scope {
                    VisibilityScope::All => true,
                    VisibilityScope::PublicOnly => r.visibility == Visibility::Public,
                    VisibilityScope::PublicOrOwn(id) => {
                        r.visibility == Visibility::Public || r.author_id == id
                    }
                })
                .filter(|r| filter.kind.is_none_or(|k| r.kind() == k))
                .filter(|r| {
                    filter.keyword.as_deref().is_none_or(|kw| {
                        let kw = kw.to_lowercase();
                        r.title.to_lowercase().contains(&kw)
                            || r.description.to_lowercase().contains(&kw)
                    })
                })
                .cloned()
                .collect();
            items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let total = items.len() as u64;
            let items = items
                .into_iter()
                .skip(usize::try_from(page.offset()).unwrap())
                .take(usize::try_from(page.limit()).unwrap())
                .collect();
            Ok((items, total))
        }

        async fn apply_update(
            &self,
            id: Uuid,
            patch: ResourceUpdate,
        ) -> Result<Option<Resource>, ResourceError> {
            let mut map = self.resources.lock().unwrap();
            let Some(resource) = map.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(title) = patch.title {
                resource.title = title;
            }
            if let Some(description) = patch.description {
                resource.description = description;
            }
            if let Some(visibility) = patch.visibility {
                resource.visibility = visibility;
            }
            if let Some(is_featured) = patch.is_featured {
                resource.is_featured = is_featured;
            }
            if let Some(external_url) = patch.external_url {
                resource.content = ResourceContent::Url { external_url };
            }
            if let Some(markdown_content) = patch.markdown_content {
                resource.content = ResourceContent::Note { markdown_content };
            }
            Ok(Some(resource.clone()))
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ResourceError> {
            Ok(self.resources.lock().unwrap().remove(&id).is_some())
        }

        async fn increment(
            &self,
            id: Uuid,
            metric: Metric,
        ) -> Result<Option<Resource>, ResourceError> {
            let mut map = self.resources.lock().unwrap();
            let Some(resource) = map.get_mut(&id) else {
                return Ok(None);
            };
            match metric {
                Metric::Views => resource.metrics.views += 1,
                Metric::Downloads => resource.metrics.downloads += 1,
                Metric::Likes => resource.metrics.likes += 1,
            }
            Ok(Some(resource.clone()))
        }
    }

    fn fs_router() -> Arc<StorageRouter> {
        let root = std::env::temp_dir().join(format!("eduvault-svc-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&root).expect("create temp root");
        let builder =
            opendal::services::Fs::default().root(root.to_str().expect("utf-8 temp path"));
        let operator = opendal::Operator::new(builder).expect("fs operator").finish();
        let local = LocalObjectStore::with_operator(operator, "http://localhost:9000", "resources");
        Arc::new(StorageRouter::for_tests(
            local,
            None,
            1024 * 1024,
            vec!["application/pdf".to_string()],
        ))
    }

    fn service() -> ResourceService<MockResourceRepository> {
        ResourceService::new(fs_router(), Arc::new(MockResourceRepository::new()))
    }

    fn student() -> Actor {
        Actor::new(Uuid::new_v4(), Role::Student)
    }

    fn note_input(visibility: Visibility) -> CreateResource {
        CreateResource {
            title: "Study notes".to_string(),
            description: "Week one".to_string(),
            visibility,
            is_featured: false,
            content: NewContent::Note {
                markdown_content: "# Week one".to_string(),
            },
        }
    }

    fn pdf_input() -> CreateResource {
        CreateResource {
            title: "Syllabus".to_string(),
            description: "Course syllabus".to_string(),
            visibility: Visibility::Public,
            is_featured: false,
            content: NewContent::Upload {
                payload: Bytes::from_static(b"%PDF-1.4 test"),
                mime_type: "application/pdf".to_string(),
                filename: Some("syllabus.pdf".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_create_note_starts_with_zero_counters() {
        let svc = service();
        let author = student();

        let resource = svc
            .create(note_input(Visibility::Public), &author)
            .await
            .expect("create should succeed");

        assert_eq!(resource.kind(), ResourceKind::Note);
        assert_eq!(resource.author_id, author.id);
        assert_eq!(resource.metrics, Metrics::default());
    }

    #[tokio::test]
    async fn test_create_upload_roundtrips_through_download() {
        let svc = service();
        let author = student();

        let resource = svc.create(pdf_input(), &author).await.expect("create");
        let ResourceContent::Upload(upload) = &resource.content else {
            panic!("expected upload content");
        };
        assert!(upload.storage_key.ends_with(".pdf"));
        assert_eq!(upload.size_bytes, 13);

        let outcome = svc.download(resource.id, None).await.expect("download");
        assert_eq!(
            outcome.url,
            format!("http://localhost:9000/resources/{}", upload.storage_key)
        );
        assert_eq!(outcome.download_count, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_mime_with_no_record() {
        let repo = Arc::new(MockResourceRepository::new());
        let svc = ResourceService::new(fs_router(), repo.clone());
        let author = student();

        let mut input = pdf_input();
        input.content = NewContent::Upload {
            payload: Bytes::from_static(b"MZ"),
            mime_type: "application/x-evil".to_string(),
            filename: Some("evil.exe".to_string()),
        };

        let err = svc.create(input, &author).await.unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Storage(crate::storage::StorageError::UnsupportedMediaType { .. })
        ));
        assert!(repo.resources.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_insert_failure_after_upload() {
        let svc = ResourceService::new(
            fs_router(),
            Arc::new(MockResourceRepository::failing_inserts()),
        );
        let err = svc.create(pdf_input(), &student()).await.unwrap_err();
        assert!(matches!(err, ResourceError::Repository(_)));
    }

    #[tokio::test]
    async fn test_get_increments_view_count() {
        let svc = service();
        let author = student();
        let created = svc
            .create(note_input(Visibility::Public), &author)
            .await
            .expect("create");

        let first = svc.get(created.id, None).await.expect("get");
        assert_eq!(first.metrics.views, 1);
        let second = svc.get(created.id, Some(&author)).await.expect("get");
        assert_eq!(second.metrics.views, 2);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let svc = service();
        let err = svc.get(Uuid::new_v4(), None).await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_private_note_access_matrix() {
        let svc = service();
        let author = student();
        let created = svc
            .create(note_input(Visibility::Private), &author)
            .await
            .expect("create");

        // Anonymous: existence is hidden.
        let err = svc.get(created.id, None).await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));

        // Another student: denied, but told so.
        let other = student();
        let err = svc.get(created.id, Some(&other)).await.unwrap_err();
        assert!(matches!(err, ResourceError::Forbidden(_)));

        // The author reads it and the view is counted.
        let got = svc.get(created.id, Some(&author)).await.expect("get");
        assert_eq!(got.metrics.views, 1);

        // A teacher may read it too.
        let teacher = Actor::new(Uuid::new_v4(), Role::Teacher);
        assert!(svc.get(created.id, Some(&teacher)).await.is_ok());
    }

    #[tokio::test]
    async fn test_download_url_resource_returns_external_url_unchanged() {
        let svc = service();
        let author = student();
        let mut input = note_input(Visibility::Public);
        input.content = NewContent::Url {
            external_url: "https://example.com/course".to_string(),
        };
        let created = svc.create(input, &author).await.expect("create");

        let outcome = svc.download(created.id, None).await.expect("download");
        assert_eq!(outcome.url, "https://example.com/course");
        assert_eq!(outcome.download_count, 0);

        // No counter change on repeat either.
        let outcome = svc.download(created.id, None).await.expect("download");
        assert_eq!(outcome.download_count, 0);
    }

    #[tokio::test]
    async fn test_download_note_is_not_applicable() {
        let svc = service();
        let created = svc
            .create(note_input(Visibility::Public), &student())
            .await
            .expect("create");

        let err = svc.download(created.id, None).await.unwrap_err();
        assert!(matches!(err, ResourceError::NotApplicable(_)));
    }

    #[tokio::test]
    async fn test_like_is_a_raw_counter() {
        let svc = service();
        let author = student();
        let created = svc
            .create(note_input(Visibility::Public), &author)
            .await
            .expect("create");

        // Same actor liking twice counts twice: no per-actor ledger.
        let liker = student();
        svc.like(created.id, &liker).await.expect("like");
        let resource = svc.like(created.id, &liker).await.expect("like");
        assert_eq!(resource.metrics.likes, 2);
    }

    #[tokio::test]
    async fn test_update_rejects_kind_change() {
        let svc = service();
        let author = student();
        let created = svc
            .create(note_input(Visibility::Public), &author)
            .await
            .expect("create");

        let patch = ResourceUpdate {
            external_url: Some("https://example.com".to_string()),
            ..Default::default()
        };
        let err = svc.update(created.id, patch, &author).await.unwrap_err();
        assert!(matches!(err, ResourceError::Validation(_)));

        // Record unchanged.
        let unchanged = svc
            .repo
            .find_by_id(created.id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(unchanged.kind(), ResourceKind::Note);
    }

    #[tokio::test]
    async fn test_update_permission_matrix() {
        let svc = service();
        let author = student();
        let created = svc
            .create(note_input(Visibility::Public), &author)
            .await
            .expect("create");

        let patch = ResourceUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };

        // A non-author teacher may not edit; a coordinator may.
        let teacher = Actor::new(Uuid::new_v4(), Role::Teacher);
        let err = svc
            .update(created.id, patch.clone(), &teacher)
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::Forbidden(_)));

        let coordinator = Actor::new(Uuid::new_v4(), Role::Coordinator);
        let updated = svc
            .update(created.id, patch.clone(), &coordinator)
            .await
            .expect("update");
        assert_eq!(updated.title, "Renamed");

        // The author may edit their own record.
        let patch = ResourceUpdate {
            is_featured: Some(true),
            ..Default::default()
        };
        let updated = svc.update(created.id, patch, &author).await.expect("update");
        assert!(updated.is_featured);
    }

    #[tokio::test]
    async fn test_delete_upload_removes_record_and_payload() {
        let repo = Arc::new(MockResourceRepository::new());
        let svc = ResourceService::new(fs_router(), repo.clone());
        let author = student();

        let created = svc.create(pdf_input(), &author).await.expect("create");
        svc.delete(created.id, &author).await.expect("delete");

        assert!(repo.resources.lock().unwrap().is_empty());
        let err = svc.get(created.id, Some(&author)).await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_denied_for_non_author() {
        let svc = service();
        let created = svc
            .create(note_input(Visibility::Public), &student())
            .await
            .expect("create");

        let err = svc.delete(created.id, &student()).await.unwrap_err();
        assert!(matches!(err, ResourceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_list_respects_visibility_scope() {
        let svc = service();
        let author = student();

        svc.create(note_input(Visibility::Public), &author)
            .await
            .expect("create public");
        svc.create(note_input(Visibility::Private), &author)
            .await
            .expect("create private");

        let (items, total) = svc
            .list(ResourceFilter::default(), PageRequest::default(), None)
            .await
            .expect("list");
        assert_eq!(total, 1);
        assert_eq!(items.len(), 1);

        // The author sees their own private record.
        let (_, total) = svc
            .list(
                ResourceFilter::default(),
                PageRequest::default(),
                Some(&author),
            )
            .await
            .expect("list");
        assert_eq!(total, 2);

        // Elevated roles see everything.
        let teacher = Actor::new(Uuid::new_v4(), Role::Teacher);
        let (_, total) = svc
            .list(
                ResourceFilter::default(),
                PageRequest::default(),
                Some(&teacher),
            )
            .await
            .expect("list");
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_keyword_and_kind() {
        let svc = service();
        let author = student();

        let mut a = note_input(Visibility::Public);
        a.title = "Algebra basics".to_string();
        svc.create(a, &author).await.expect("create");

        let mut b = note_input(Visibility::Public);
        b.title = "Chemistry lab".to_string();
        b.content = NewContent::Url {
            external_url: "https://example.com/chem".to_string(),
        };
        svc.create(b, &author).await.expect("create");

        let (items, total) = svc
            .list(
                ResourceFilter {
                    keyword: Some("algebra".to_string()),
                    kind: None,
                },
                PageRequest::default(),
                None,
            )
            .await
            .expect("list");
        assert_eq!(total, 1);
        assert_eq!(items[0].title, "Algebra basics");

        let (items, total) = svc
            .list(
                ResourceFilter {
                    keyword: None,
                    kind: Some(ResourceKind::Url),
                },
                PageRequest::default(),
                None,
            )
            .await
            .expect("list");
        assert_eq!(total, 1);
        assert_eq!(items[0].kind(), ResourceKind::Url);
    }
}
