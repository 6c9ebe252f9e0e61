//! # Quire Infrastructure
//!
//! Concrete implementations of the repository ports defined in `quire-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//! - `minimal` - In-memory storage only, no database driver

pub mod database;
pub mod memory;

pub use database::DatabaseConfig;
pub use memory::{InMemoryAuthorRepository, InMemoryDatabase, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresAuthorRepository, PostgresPostRepository};
