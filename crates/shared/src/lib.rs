//! Shared types, errors, and configuration for Eduvault.
//!
//! This crate provides common types used across all other crates:
//! - Actor identity and the ordered role model
//! - JWT decoding for bearer tokens
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod actor;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use actor::{Actor, Claims, Role};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use types::{PageRequest, PageResponse};
