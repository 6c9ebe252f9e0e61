use std::sync::Arc;

use crate::domain::{Author, AuthorId, NewAuthor, require_text};
use crate::error::DomainError;
use crate::ports::{AuthorRepository, BaseRepository};

/// Author operations with validation and cascade semantics.
#[derive(Clone)]
pub struct AuthorStore {
    authors: Arc<dyn AuthorRepository>,
}

impl AuthorStore {
    pub fn new(authors: Arc<dyn AuthorRepository>) -> Self {
        Self { authors }
    }

    /// Create an author. The name must contain something besides whitespace.
    pub async fn create(&self, name: String) -> Result<Author, DomainError> {
        require_text("name", &name)?;
        Ok(self.authors.insert(NewAuthor::new(name)).await?)
    }

    /// Look up an author. Absence is `Ok(None)`, not an error.
    pub async fn get(&self, id: AuthorId) -> Result<Option<Author>, DomainError> {
        Ok(self.authors.find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<Author>, DomainError> {
        Ok(self.authors.find_all().await?)
    }

    /// Rename an author. Without a name this is a read-back of the current
    /// record; it still fails if the author does not exist.
    pub async fn update(&self, id: AuthorId, name: Option<String>) -> Result<Author, DomainError> {
        let Some(name) = name else {
            return self
                .authors
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::author_not_found(id));
        };

        require_text("name", &name)?;
        self.authors
            .update_name(id, name)
            .await?
            .ok_or_else(|| DomainError::author_not_found(id))
    }

    /// Delete an author along with all of its posts.
    ///
    /// Returns the number of posts that were removed with it.
    pub async fn delete(&self, id: AuthorId) -> Result<u64, DomainError> {
        self.authors
            .delete_cascade(id)
            .await?
            .ok_or_else(|| DomainError::author_not_found(id))
    }
}
