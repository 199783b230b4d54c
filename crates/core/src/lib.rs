//! Core business logic for Eduvault.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, the visibility policy, and the storage
//! routing live here.
//!
//! # Modules
//!
//! - `resource` - Polymorphic resource model, visibility policy, and service
//! - `storage` - Object-storage backends and the key-routing layer

pub mod resource;
pub mod storage;
