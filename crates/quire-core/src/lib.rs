//! # Quire Core
//!
//! The domain layer of the Quire content backend.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod store;

pub use error::{DomainError, RepoError};
pub use store::{AuthorStore, PostStore};
