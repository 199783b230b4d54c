//! Object storage backends and key routing.
//!
//! Two providers are supported: a local S3-compatible endpoint (MinIO) whose
//! keys are bare opaque tokens, and a public cloud blob store whose keys are
//! full absolute URLs. [`StorageRouter`] is the only component aware that two
//! backends exist; everything else addresses payloads through the opaque key.

mod backend;
mod config;
mod error;
mod router;

pub use backend::{BackendId, CloudObjectStore, LocalObjectStore};
pub use config::{CloudStoreConfig, LocalStoreConfig, StorageConfig};
pub use error::StorageError;
pub use router::{StorageRouter, StoredObject};
