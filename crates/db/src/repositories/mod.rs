//! Repository implementations for data access.
//!
//! Repositories implement the persistence traits declared by the core crate,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod resource;

pub use resource::SeaOrmResourceRepository;
