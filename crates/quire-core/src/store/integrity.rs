//! Referential integrity between posts and their authors.
//!
//! A post may only be written while its author exists. The check runs before
//! the write; if the author vanishes in between, the backend's foreign-key
//! rejection is reported the same way as a failed check. The other half of
//! the rule (cascade on author delete) lives in
//! [`AuthorRepository::delete_cascade`].

use crate::domain::AuthorId;
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthorRepository, BaseRepository};

/// Fail with `NotFound(Author)` unless `author_id` resolves to a live author.
pub(crate) async fn ensure_author_exists(
    authors: &dyn AuthorRepository,
    author_id: AuthorId,
) -> Result<(), DomainError> {
    match authors.find_by_id(author_id).await? {
        Some(_) => Ok(()),
        None => Err(DomainError::author_not_found(author_id)),
    }
}

/// Translate a failed post write that referenced `author_id`.
pub(crate) fn post_write_error(err: RepoError, author_id: AuthorId) -> DomainError {
    match err {
        RepoError::ForeignKey(_) => DomainError::author_not_found(author_id),
        other => DomainError::Storage(other),
    }
}
