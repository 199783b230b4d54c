//! Resource types and data structures.
//!
//! The three content kinds share one record. In the domain model the
//! kind-specific fields live in the [`ResourceContent`] tagged union so the
//! mutual-exclusivity invariant holds by construction; the flat
//! nullable-column shape exists only at the persistence boundary.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ResourceError;

/// Resource kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Uploaded binary payload held in object storage.
    Upload,
    /// External link.
    Url,
    /// Inline markdown note.
    Note,
}

impl ResourceKind {
    /// Convert to the wire/database string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Url => "url",
            Self::Note => "note",
        }
    }

    /// Parse from the wire/database string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "upload" => Some(Self::Upload),
            "url" => Some(Self::Url),
            "note" => Some(Self::Note),
            _ => None,
        }
    }
}

/// Access scope of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Readable by anyone, including unauthenticated callers.
    Public,
    /// Readable only by elevated roles and the author.
    Private,
}

impl Visibility {
    /// Convert to the wire/database string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }

    /// Parse from the wire/database string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// Upload payload reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadContent {
    /// Opaque storage key; shape depends on the owning backend.
    pub storage_key: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Payload size in bytes.
    pub size_bytes: i64,
}

/// Kind-specific content of a resource.
///
/// Exactly the fields matching the kind exist; there is no way to construct
/// a record with, say, both a storage key and an external URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceContent {
    /// Uploaded binary payload.
    Upload(UploadContent),
    /// External link.
    Url {
        /// The external URL.
        external_url: String,
    },
    /// Inline note.
    Note {
        /// Markdown body.
        markdown_content: String,
    },
}

impl ResourceContent {
    /// The kind this content belongs to.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Upload(_) => ResourceKind::Upload,
            Self::Url { .. } => ResourceKind::Url,
            Self::Note { .. } => ResourceKind::Note,
        }
    }
}

/// Usage metrics. Non-negative and monotonically non-decreasing for the
/// lifetime of the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of reads through `get`.
    pub views: i64,
    /// Number of resolved downloads.
    pub downloads: i64,
    /// Raw like counter (no per-actor ledger).
    pub likes: i64,
}

/// A metric selectable for atomic increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// `view_count`.
    Views,
    /// `download_count`.
    Downloads,
    /// `like_count`.
    Likes,
}

/// Resource domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    /// Title, non-empty.
    pub title: String,
    /// Description, non-empty.
    pub description: String,
    /// Access scope.
    pub visibility: Visibility,
    /// Featured flag.
    pub is_featured: bool,
    /// Creating actor; immutable.
    pub author_id: Uuid,
    /// Kind-specific content.
    pub content: ResourceContent,
    /// Usage metrics.
    pub metrics: Metrics,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Resource {
    /// The record's kind, derived from its content.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.content.kind()
    }
}

/// Kind-specific input for resource creation.
#[derive(Debug, Clone)]
pub enum NewContent {
    /// A binary payload to upload before the record is persisted.
    Upload {
        /// Raw payload bytes.
        payload: Bytes,
        /// Declared MIME type, validated against the allow-list.
        mime_type: String,
        /// Original filename, used only to preserve the extension.
        filename: Option<String>,
    },
    /// External link.
    Url {
        /// The external URL.
        external_url: String,
    },
    /// Inline note.
    Note {
        /// Markdown body.
        markdown_content: String,
    },
}

impl NewContent {
    /// The kind this input will create.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Upload { .. } => ResourceKind::Upload,
            Self::Url { .. } => ResourceKind::Url,
            Self::Note { .. } => ResourceKind::Note,
        }
    }
}

/// Input for `ResourceService::create`.
#[derive(Debug, Clone)]
pub struct CreateResource {
    /// Title, required non-empty.
    pub title: String,
    /// Description, required non-empty.
    pub description: String,
    /// Access scope.
    pub visibility: Visibility,
    /// Featured flag.
    pub is_featured: bool,
    /// Kind-specific content input.
    pub content: NewContent,
}

impl CreateResource {
    /// Validate field presence before any side effect.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the title or description is empty, or if the
    /// kind-specific field is empty.
    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.title.trim().is_empty() {
            return Err(ResourceError::validation("title must not be empty"));
        }
        if self.description.trim().is_empty() {
            return Err(ResourceError::validation("description must not be empty"));
        }
        match &self.content {
            NewContent::Upload {
                payload, mime_type, ..
            } => {
                if payload.is_empty() {
                    return Err(ResourceError::validation(
                        "a file is required for upload resources",
                    ));
                }
                if mime_type.trim().is_empty() {
                    return Err(ResourceError::validation("a MIME type is required"));
                }
            }
            NewContent::Url { external_url } => {
                if external_url.trim().is_empty() {
                    return Err(ResourceError::validation(
                        "an external URL is required for url resources",
                    ));
                }
            }
            NewContent::Note { markdown_content } => {
                if markdown_content.trim().is_empty() {
                    return Err(ResourceError::validation(
                        "markdown content is required for note resources",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Fully-resolved record handed to the repository for insertion.
#[derive(Debug, Clone)]
pub struct NewResource {
    /// Pre-assigned record id.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Access scope.
    pub visibility: Visibility,
    /// Featured flag.
    pub is_featured: bool,
    /// Creating actor.
    pub author_id: Uuid,
    /// Resolved kind-specific content (upload already completed).
    pub content: ResourceContent,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Metadata patch for `ResourceService::update`.
///
/// Only supplied fields are persisted. The kind itself can never change, and
/// a kind-specific field is only accepted when it matches the record's kind.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New access scope.
    pub visibility: Option<Visibility>,
    /// New featured flag.
    pub is_featured: Option<bool>,
    /// New external URL (url resources only).
    pub external_url: Option<String>,
    /// New markdown body (note resources only).
    pub markdown_content: Option<String>,
}

impl ResourceUpdate {
    /// True when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.visibility.is_none()
            && self.is_featured.is_none()
            && self.external_url.is_none()
            && self.markdown_content.is_none()
    }

    /// Reject fields inconsistent with the record's existing kind, and empty
    /// values for required text fields.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the offending field.
    pub fn validate_for_kind(&self, kind: ResourceKind) -> Result<(), ResourceError> {
        if self.external_url.is_some() && kind != ResourceKind::Url {
            return Err(ResourceError::validation(format!(
                "field 'external_url' is not allowed for resources of kind '{}'",
                kind.as_str()
            )));
        }
        if self.markdown_content.is_some() && kind != ResourceKind::Note {
            return Err(ResourceError::validation(format!(
                "field 'markdown_content' is not allowed for resources of kind '{}'",
                kind.as_str()
            )));
        }
        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            return Err(ResourceError::validation("title must not be empty"));
        }
        if matches!(&self.description, Some(d) if d.trim().is_empty()) {
            return Err(ResourceError::validation("description must not be empty"));
        }
        if matches!(&self.external_url, Some(u) if u.trim().is_empty()) {
            return Err(ResourceError::validation("external_url must not be empty"));
        }
        if matches!(&self.markdown_content, Some(m) if m.trim().is_empty()) {
            return Err(ResourceError::validation(
                "markdown_content must not be empty",
            ));
        }
        Ok(())
    }
}

/// Keyword/kind filters for listing.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    /// Case-insensitive match against title or description.
    pub keyword: Option<String>,
    /// Restrict to a single kind.
    pub kind: Option<ResourceKind>,
}

/// Which records a requester may see in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Public records only (unauthenticated callers).
    PublicOnly,
    /// Public records plus the caller's own private records (base members).
    PublicOrOwn(Uuid),
    /// Everything (elevated roles).
    All,
}

/// Result of `ResourceService::download`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Resolved retrieval URL (or the external URL verbatim).
    pub url: String,
    /// Download counter after this call.
    pub download_count: i64,
}
