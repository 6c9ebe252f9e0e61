use async_trait::async_trait;

use crate::domain::{
    Author, AuthorId, NewAuthor, NewPost, Post, PostChanges, PostId, PostWithAuthor,
};
use crate::error::RepoError;

/// Read operations shared by every repository.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities in ascending ID order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;
}

/// Author repository.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, AuthorId> {
    /// Persist a new author, letting the backend assign the ID.
    async fn insert(&self, author: NewAuthor) -> Result<Author, RepoError>;

    /// Replace an author's name. `None` when the author does not exist.
    async fn update_name(&self, id: AuthorId, name: String) -> Result<Option<Author>, RepoError>;

    /// Delete an author and every post that references it as one atomic unit.
    ///
    /// Returns the number of posts removed, or `None` when the author does not
    /// exist (in which case nothing is written).
    async fn delete_cascade(&self, id: AuthorId) -> Result<Option<u64>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// Persist a new post, letting the backend assign the ID.
    ///
    /// Fails with [`RepoError::ForeignKey`] if the referenced author is gone.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// A single post joined with its author.
    async fn find_with_author(&self, id: PostId) -> Result<Option<PostWithAuthor>, RepoError>;

    /// Every post joined with its author, in ascending ID order.
    async fn find_all_with_author(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// Apply the provided fields and set `updated_at`.
    /// `None` when the post does not exist.
    async fn update(
        &self,
        id: PostId,
        changes: PostChanges,
        updated_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<Post>, RepoError>;

    /// Delete a post. Returns `false` when it did not exist.
    async fn delete(&self, id: PostId) -> Result<bool, RepoError>;
}
