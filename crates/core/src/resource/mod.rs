//! Polymorphic resource model, visibility policy, and service.
//!
//! A resource is one of three content kinds (upload, external URL, inline
//! note) sharing a single record. This module provides:
//! - The tagged-union domain model with its mutual-exclusivity invariant
//! - The pure visibility/authorization policy
//! - The service orchestrating persistence, storage routing, and metrics

mod error;
pub mod policy;
mod service;
mod types;

pub use error::ResourceError;
pub use service::{ResourceRepository, ResourceService};
pub use types::{
    CreateResource, DownloadOutcome, Metric, Metrics, NewContent, NewResource, Resource,
    ResourceContent, ResourceFilter, ResourceKind, ResourceUpdate, UploadContent, Visibility,
    VisibilityScope,
};
