//! Resource management routes.
//!
//! The read surface (list, get, download) serves anonymous callers; create,
//! like, update, and delete require authentication. Policy decisions live in
//! the core service; this layer only translates HTTP.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    middleware::{CurrentActor, OptionalActor},
};
use eduvault_core::resource::{
    CreateResource, NewContent, Resource, ResourceContent, ResourceError, ResourceFilter,
    ResourceKind, ResourceService, ResourceUpdate, Visibility,
};
use eduvault_db::SeaOrmResourceRepository;
use eduvault_shared::{AppError, PageRequest, PageResponse};

/// Transport-level cap on multipart bodies. The storage router enforces the
/// configured per-file limit with a proper 413.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Creates the resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/resources", post(create_resource).get(list_resources))
        .route(
            "/resources/{id}",
            get(get_resource)
                .patch(update_resource)
                .delete(delete_resource),
        )
        .route("/resources/{id}/download", post(download_resource))
        .route("/resources/{id}/like", post(like_resource))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing resources.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Page number (1-indexed).
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(default)]
    pub per_page: Option<u32>,
    /// Case-insensitive keyword matched against title and description.
    #[serde(default)]
    pub keyword: Option<String>,
    /// Restrict to a single kind (`upload`, `url`, `note`).
    #[serde(default)]
    pub kind: Option<String>,
}

/// Response for a resource.
#[derive(Debug, Serialize)]
pub struct ResourceResponse {
    /// Resource ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Kind (`upload`, `url`, `note`).
    pub kind: &'static str,
    /// Visibility (`public`, `private`).
    pub visibility: &'static str,
    /// Featured flag.
    pub is_featured: bool,
    /// Author user ID.
    pub author_id: Uuid,
    /// MIME type (upload resources only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Payload size in bytes (upload resources only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    /// External URL (url resources only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    /// Markdown body (note resources only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_content: Option<String>,
    /// View count.
    pub view_count: i64,
    /// Download count.
    pub download_count: i64,
    /// Like count.
    pub like_count: i64,
    /// Created at timestamp (ISO 8601).
    pub created_at: String,
}

impl From<Resource> for ResourceResponse {
    fn from(resource: Resource) -> Self {
        let kind = resource.kind().as_str();
        let (mime_type, size_bytes, external_url, markdown_content) = match resource.content {
            ResourceContent::Upload(upload) => {
                (Some(upload.mime_type), Some(upload.size_bytes), None, None)
            }
            ResourceContent::Url { external_url } => (None, None, Some(external_url), None),
            ResourceContent::Note { markdown_content } => {
                (None, None, None, Some(markdown_content))
            }
        };

        Self {
            id: resource.id,
            title: resource.title,
            description: resource.description,
            kind,
            visibility: resource.visibility.as_str(),
            is_featured: resource.is_featured,
            author_id: resource.author_id,
            mime_type,
            size_bytes,
            external_url,
            markdown_content,
            view_count: resource.metrics.views,
            download_count: resource.metrics.downloads,
            like_count: resource.metrics.likes,
            created_at: resource.created_at.to_rfc3339(),
        }
    }
}

/// Response for a resolved download.
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    /// Retrieval URL.
    pub download_url: String,
    /// Download count after this call.
    pub download_count: i64,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn resource_service(state: &AppState) -> ResourceService<SeaOrmResourceRepository> {
    ResourceService::new(
        state.storage.clone(),
        Arc::new(SeaOrmResourceRepository::new((*state.db).clone())),
    )
}

fn error_body(error: &str, message: impl std::fmt::Display) -> Json<serde_json::Value> {
    Json(json!({ "error": error, "message": message.to_string() }))
}

/// Map a service error to an HTTP response via the shared error taxonomy.
fn error_response(e: ResourceError) -> Response {
    let app_error = AppError::from(e);
    if app_error.status_code() >= 500 {
        error!(error = %app_error, "Request failed");
    }

    let status = StatusCode::from_u16(app_error.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    // Never leak backend details in 5xx bodies.
    let message = match &app_error {
        AppError::Database(_) | AppError::Internal(_) => "An error occurred".to_string(),
        AppError::BackendUnavailable(_) => "Storage backend is unavailable".to_string(),
        other => other.to_string(),
    };

    (status, error_body(app_error.error_code(), message)).into_response()
}

/// Parse the multipart form for resource creation.
///
/// Expected fields: `title`, `description`, `kind`, optional `visibility`
/// and `is_featured`, plus exactly one of `file`, `external_url`, or
/// `markdown_content` matching the kind.
async fn parse_create_form(mut multipart: Multipart) -> Result<CreateResource, Response> {
    let mut title = None;
    let mut description = None;
    let mut kind = None;
    let mut visibility = Visibility::Public;
    let mut is_featured = false;
    let mut file = None;
    let mut external_url = None;
    let mut markdown_content = None;

    let bad_request = |error: &str, message: &dyn std::fmt::Display| {
        (StatusCode::BAD_REQUEST, error_body(error, message)).into_response()
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request("invalid_multipart", &e))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        match name.as_str() {
            "file" => {
                let mime_type = field
                    .content_type()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                let filename = field.file_name().map(ToString::to_string);
                let payload = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request("invalid_multipart", &e))?;
                file = Some((payload, mime_type, filename));
            }
            "title" => title = Some(read_text(field).await?),
            "description" => description = Some(read_text(field).await?),
            "kind" => kind = Some(read_text(field).await?),
            "visibility" => {
                let value = read_text(field).await?;
                visibility = Visibility::parse(&value).ok_or_else(|| {
                    bad_request(
                        "validation_error",
                        &format!("unknown visibility '{value}'"),
                    )
                })?;
            }
            "is_featured" => {
                let value = read_text(field).await?;
                is_featured = matches!(value.as_str(), "true" | "1");
            }
            "external_url" => external_url = Some(read_text(field).await?),
            "markdown_content" => markdown_content = Some(read_text(field).await?),
            _ => {}
        }
    }

    let kind = kind
        .as_deref()
        .map(ResourceKind::parse)
        .ok_or_else(|| bad_request("validation_error", &"field 'kind' is required"))?
        .ok_or_else(|| bad_request("validation_error", &"unknown resource kind"))?;

    let content = match kind {
        ResourceKind::Upload => {
            let (payload, mime_type, filename) = file.ok_or_else(|| {
                bad_request("validation_error", &"a file is required for upload resources")
            })?;
            NewContent::Upload {
                payload,
                mime_type,
                filename,
            }
        }
        ResourceKind::Url => NewContent::Url {
            external_url: external_url.unwrap_or_default(),
        },
        ResourceKind::Note => NewContent::Note {
            markdown_content: markdown_content.unwrap_or_default(),
        },
    };

    Ok(CreateResource {
        title: title.unwrap_or_default(),
        description: description.unwrap_or_default(),
        visibility,
        is_featured,
        content,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, Response> {
    field.text().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            error_body("invalid_multipart", e),
        )
            .into_response()
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/resources`
/// Create a resource from a multipart form.
async fn create_resource(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    multipart: Multipart,
) -> impl IntoResponse {
    let input = match parse_create_form(multipart).await {
        Ok(input) => input,
        Err(response) => return response,
    };

    match resource_service(&state).create(input, &actor).await {
        Ok(resource) => {
            info!(resource_id = %resource.id, author_id = %actor.id, "Resource created");
            (StatusCode::CREATED, Json(ResourceResponse::from(resource))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET `/resources`
/// List resources visible to the caller, newest first.
async fn list_resources(
    State(state): State<AppState>,
    OptionalActor(actor): OptionalActor,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let page = PageRequest {
        page: query.page.unwrap_or(1).max(1),
        per_page: query.per_page.unwrap_or(20).clamp(1, 100),
    };

    let kind = match query.kind.as_deref() {
        None => None,
        Some(s) => match ResourceKind::parse(s) {
            Some(kind) => Some(kind),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    error_body("validation_error", format!("unknown resource kind '{s}'")),
                )
                    .into_response();
            }
        },
    };

    let filter = ResourceFilter {
        keyword: query.keyword.filter(|k| !k.trim().is_empty()),
        kind,
    };

    match resource_service(&state)
        .list(filter, page, actor.as_ref())
        .await
    {
        Ok((items, total)) => {
            let data: Vec<ResourceResponse> =
                items.into_iter().map(ResourceResponse::from).collect();
            Json(PageResponse::new(data, page.page, page.per_page, total)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET `/resources/{id}`
/// Fetch a resource, counting the view.
async fn get_resource(
    State(state): State<AppState>,
    OptionalActor(actor): OptionalActor,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match resource_service(&state).get(id, actor.as_ref()).await {
        Ok(resource) => Json(ResourceResponse::from(resource)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST `/resources/{id}/download`
/// Resolve a retrieval URL, counting the download for upload resources.
async fn download_resource(
    State(state): State<AppState>,
    OptionalActor(actor): OptionalActor,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match resource_service(&state).download(id, actor.as_ref()).await {
        Ok(outcome) => Json(DownloadResponse {
            download_url: outcome.url,
            download_count: outcome.download_count,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST `/resources/{id}/like`
/// Increment the like counter.
async fn like_resource(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match resource_service(&state).like(id, &actor).await {
        Ok(resource) => Json(ResourceResponse::from(resource)).into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH `/resources/{id}`
/// Patch resource metadata.
async fn update_resource(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
    Json(patch): Json<ResourceUpdate>,
) -> impl IntoResponse {
    if patch.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            error_body("validation_error", "at least one field must be supplied"),
        )
            .into_response();
    }

    match resource_service(&state).update(id, patch, &actor).await {
        Ok(resource) => {
            info!(resource_id = %resource.id, actor_id = %actor.id, "Resource updated");
            Json(ResourceResponse::from(resource)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// DELETE `/resources/{id}`
/// Delete a resource and its stored payload.
async fn delete_resource(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match resource_service(&state).delete(id, &actor).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
