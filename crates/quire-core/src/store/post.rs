use std::sync::Arc;

use crate::domain::{AuthorId, NewPost, Post, PostChanges, PostId, PostWithAuthor, require_text};
use crate::error::DomainError;
use crate::ports::{AuthorRepository, BaseRepository, PostRepository};

use super::integrity::{ensure_author_exists, post_write_error};

/// Post operations. Every write checks the author reference first.
#[derive(Clone)]
pub struct PostStore {
    posts: Arc<dyn PostRepository>,
    authors: Arc<dyn AuthorRepository>,
}

impl PostStore {
    pub fn new(posts: Arc<dyn PostRepository>, authors: Arc<dyn AuthorRepository>) -> Self {
        Self { posts, authors }
    }

    pub async fn create(
        &self,
        title: String,
        content: String,
        author_id: AuthorId,
    ) -> Result<Post, DomainError> {
        require_text("title", &title)?;
        require_text("content", &content)?;
        ensure_author_exists(self.authors.as_ref(), author_id).await?;

        self.posts
            .insert(NewPost::new(title, content, author_id))
            .await
            .map_err(|e| post_write_error(e, author_id))
    }

    /// Look up a post with its author. Absence is `Ok(None)`.
    pub async fn get(&self, id: PostId) -> Result<Option<PostWithAuthor>, DomainError> {
        Ok(self.posts.find_with_author(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
        Ok(self.posts.find_all_with_author().await?)
    }

    /// Apply a partial update.
    ///
    /// `updated_at` moves forward on every call, including one with no
    /// changes at all.
    pub async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, DomainError> {
        if let Some(title) = &changes.title {
            require_text("title", title)?;
        }
        if let Some(content) = &changes.content {
            require_text("content", content)?;
        }

        let existing = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        if let Some(author_id) = changes.author_id {
            ensure_author_exists(self.authors.as_ref(), author_id).await?;
        }

        let author_id = changes.author_id.unwrap_or(existing.author_id);
        self.posts
            .update(id, changes, existing.next_updated_at())
            .await
            .map_err(|e| post_write_error(e, author_id))?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        if self.posts.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::post_not_found(id))
        }
    }
}
