//! HTTP middleware.

pub mod auth;

pub use auth::{CurrentActor, OptionalActor, optional_auth_middleware};
