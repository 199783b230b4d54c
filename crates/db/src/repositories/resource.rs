//! Resource repository for database operations.
//!
//! Implements resource CRUD and atomic counter increments using `SeaORM`.

use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{
    resources, sea_orm_active_enums::ResourceKind as DbResourceKind,
    sea_orm_active_enums::Visibility as DbVisibility,
};
use eduvault_core::resource::{
    Metric, Metrics, NewResource, Resource, ResourceContent, ResourceError, ResourceFilter,
    ResourceKind, ResourceRepository, ResourceUpdate, UploadContent, Visibility, VisibilityScope,
};
use eduvault_shared::PageRequest;

/// Resource repository implementation.
#[derive(Debug, Clone)]
pub struct SeaOrmResourceRepository {
    db: DatabaseConnection,
}

impl SeaOrmResourceRepository {
    /// Create a new resource repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ResourceRepository for SeaOrmResourceRepository {
    async fn insert(&self, input: NewResource) -> Result<Resource, ResourceError> {
        let (storage_key, mime_type, size_bytes, external_url, markdown_content) =
            match &input.content {
                ResourceContent::Upload(upload) => (
                    Some(upload.storage_key.clone()),
                    Some(upload.mime_type.clone()),
                    Some(upload.size_bytes),
                    None,
                    None,
                ),
                ResourceContent::Url { external_url } => {
                    (None, None, None, Some(external_url.clone()), None)
                }
                ResourceContent::Note { markdown_content } => {
                    (None, None, None, None, Some(markdown_content.clone()))
                }
            };

        let active_model = resources::ActiveModel {
            id: Set(input.id),
            title: Set(input.title),
            description: Set(input.description),
            kind: Set(to_db_kind(input.content.kind())),
            visibility: Set(to_db_visibility(input.visibility)),
            is_featured: Set(input.is_featured),
            storage_key: Set(storage_key),
            mime_type: Set(mime_type),
            size_bytes: Set(size_bytes),
            external_url: Set(external_url),
            markdown_content: Set(markdown_content),
            view_count: Set(0),
            download_count: Set(0),
            like_count: Set(0),
            author_id: Set(input.author_id),
            created_at: Set(input.created_at.into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ResourceError::repository(e.to_string()))?;

        to_domain(model)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, ResourceError> {
        let model = resources::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ResourceError::repository(e.to_string()))?;

        model.map(to_domain).transpose()
    }

    async fn list(
        &self,
        scope: VisibilityScope,
        filter: ResourceFilter,
        page: PageRequest,
    ) -> Result<(Vec<Resource>, u64), ResourceError> {
        let mut query = resources::Entity::find().filter(scope_condition(scope));

        if let Some(kind) = filter.kind {
            query = query.filter(resources::Column::Kind.eq(to_db_kind(kind)));
        }
        if let Some(keyword) = &filter.keyword {
            let pattern = format!("%{}%", keyword.trim());
            query = query.filter(
                Condition::any()
                    .add(Expr::col(resources::Column::Title).ilike(pattern.clone()))
                    .add(Expr::col(resources::Column::Description).ilike(pattern)),
            );
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| ResourceError::repository(e.to_string()))?;

        let models = query
            .order_by_desc(resources::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(|e| ResourceError::repository(e.to_string()))?;

        let items = models
            .into_iter()
            .map(to_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total))
    }

    async fn apply_update(
        &self,
        id: Uuid,
        patch: ResourceUpdate,
    ) -> Result<Option<Resource>, ResourceError> {
        let Some(model) = resources::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ResourceError::repository(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut active_model: resources::ActiveModel = model.into();
        if let Some(title) = patch.title {
            active_model.title = Set(title);
        }
        if let Some(description) = patch.description {
            active_model.description = Set(description);
        }
        if let Some(visibility) = patch.visibility {
            active_model.visibility = Set(to_db_visibility(visibility));
        }
        if let Some(is_featured) = patch.is_featured {
            active_model.is_featured = Set(is_featured);
        }
        if let Some(external_url) = patch.external_url {
            active_model.external_url = Set(Some(external_url));
        }
        if let Some(markdown_content) = patch.markdown_content {
            active_model.markdown_content = Set(Some(markdown_content));
        }

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| ResourceError::repository(e.to_string()))?;

        to_domain(model).map(Some)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ResourceError> {
        let result = resources::Entity::delete_many()
            .filter(resources::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ResourceError::repository(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn increment(&self, id: Uuid, metric: Metric) -> Result<Option<Resource>, ResourceError> {
        let column = match metric {
            Metric::Views => resources::Column::ViewCount,
            Metric::Downloads => resources::Column::DownloadCount,
            Metric::Likes => resources::Column::LikeCount,
        };

        // Single UPDATE .. SET col = col + 1; concurrent increments never
        // lose counts.
        let result = resources::Entity::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(resources::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ResourceError::repository(e.to_string()))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}

/// Translate a visibility scope into a SQL condition.
fn scope_condition(scope: VisibilityScope) -> Condition {
    match scope {
        VisibilityScope::All => Condition::all(),
        VisibilityScope::PublicOnly => {
            Condition::all().add(resources::Column::Visibility.eq(DbVisibility::Public))
        }
        VisibilityScope::PublicOrOwn(author_id) => Condition::any()
            .add(resources::Column::Visibility.eq(DbVisibility::Public))
            .add(resources::Column::AuthorId.eq(author_id)),
    }
}

/// Convert domain kind to database enum.
const fn to_db_kind(kind: ResourceKind) -> DbResourceKind {
    match kind {
        ResourceKind::Upload => DbResourceKind::Upload,
        ResourceKind::Url => DbResourceKind::Url,
        ResourceKind::Note => DbResourceKind::Note,
    }
}

/// Convert domain visibility to database enum.
const fn to_db_visibility(visibility: Visibility) -> DbVisibility {
    match visibility {
        Visibility::Public => DbVisibility::Public,
        Visibility::Private => DbVisibility::Private,
    }
}

/// Convert database visibility to domain enum.
const fn from_db_visibility(visibility: DbVisibility) -> Visibility {
    match visibility {
        DbVisibility::Public => Visibility::Public,
        DbVisibility::Private => Visibility::Private,
    }
}

/// Convert a database row to the domain model.
///
/// The CHECK constraint guarantees the kind-specific columns are consistent;
/// a row that still violates it maps to a repository error rather than a
/// panic.
fn to_domain(model: resources::Model) -> Result<Resource, ResourceError> {
    let content = match model.kind {
        DbResourceKind::Upload => match (model.storage_key, model.mime_type, model.size_bytes) {
            (Some(storage_key), Some(mime_type), Some(size_bytes)) => {
                ResourceContent::Upload(UploadContent {
                    storage_key,
                    mime_type,
                    size_bytes,
                })
            }
            _ => {
                return Err(ResourceError::repository(format!(
                    "resource {} has kind 'upload' but incomplete storage columns",
                    model.id
                )))
            }
        },
        DbResourceKind::Url => match model.external_url {
            Some(external_url) => ResourceContent::Url { external_url },
            None => {
                return Err(ResourceError::repository(format!(
                    "resource {} has kind 'url' but no external_url",
                    model.id
                )))
            }
        },
        DbResourceKind::Note => match model.markdown_content {
            Some(markdown_content) => ResourceContent::Note { markdown_content },
            None => {
                return Err(ResourceError::repository(format!(
                    "resource {} has kind 'note' but no markdown_content",
                    model.id
                )))
            }
        },
    };

    Ok(Resource {
        id: model.id,
        title: model.title,
        description: model.description,
        visibility: from_db_visibility(model.visibility),
        is_featured: model.is_featured,
        author_id: model.author_id,
        content,
        metrics: Metrics {
            views: model.view_count,
            downloads: model.download_count,
            likes: model.like_count,
        },
        created_at: model.created_at.with_timezone(&chrono::Utc),
    })
}
