//! In-memory storage - used when no database is configured, and in tests.
//!
//! Both tables sit behind a single async `RwLock`, so a cascade delete is
//! one critical section and readers never observe a post whose author is
//! already gone. Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use quire_core::domain::{
    Author, AuthorId, NewAuthor, NewPost, Post, PostChanges, PostId, PostWithAuthor,
};
use quire_core::error::RepoError;
use quire_core::ports::{AuthorRepository, BaseRepository, PostRepository};

#[derive(Default)]
struct Tables {
    authors: BTreeMap<AuthorId, Author>,
    posts: BTreeMap<PostId, Post>,
    next_author_id: AuthorId,
    next_post_id: PostId,
}

impl Tables {
    fn join(&self, post: &Post) -> Option<PostWithAuthor> {
        let author = self.authors.get(&post.author_id)?;
        Some(PostWithAuthor {
            post: post.clone(),
            author: author.clone(),
        })
    }

    fn foreign_key_violation(author_id: AuthorId) -> RepoError {
        RepoError::ForeignKey(format!("author {author_id} does not exist"))
    }
}

/// Shared in-memory tables. Hand out repositories with [`authors`] and [`posts`].
///
/// [`authors`]: InMemoryDatabase::authors
/// [`posts`]: InMemoryDatabase::posts
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authors(&self) -> InMemoryAuthorRepository {
        InMemoryAuthorRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            tables: Arc::clone(&self.tables),
        }
    }
}

/// Author repository over [`InMemoryDatabase`].
pub struct InMemoryAuthorRepository {
    tables: Arc<RwLock<Tables>>,
}

/// Post repository over [`InMemoryDatabase`].
pub struct InMemoryPostRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl BaseRepository<Author, AuthorId> for InMemoryAuthorRepository {
    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, RepoError> {
        Ok(self.tables.read().await.authors.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        Ok(self.tables.read().await.authors.values().cloned().collect())
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn insert(&self, author: NewAuthor) -> Result<Author, RepoError> {
        let mut tables = self.tables.write().await;
        tables.next_author_id += 1;

        let author = Author {
            id: tables.next_author_id,
            name: author.name,
            created_at: author.created_at,
        };
        tables.authors.insert(author.id, author.clone());

        tracing::debug!(author_id = author.id, "Inserted author");
        Ok(author)
    }

    async fn update_name(&self, id: AuthorId, name: String) -> Result<Option<Author>, RepoError> {
        let mut tables = self.tables.write().await;
        Ok(tables.authors.get_mut(&id).map(|author| {
            author.name = name;
            author.clone()
        }))
    }

    async fn delete_cascade(&self, id: AuthorId) -> Result<Option<u64>, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&id) {
            return Ok(None);
        }

        let before = tables.posts.len();
        tables.posts.retain(|_, post| post.author_id != id);
        let removed = (before - tables.posts.len()) as u64;
        tables.authors.remove(&id);

        tracing::debug!(author_id = id, posts_removed = removed, "Deleted author with cascade");
        Ok(Some(removed))
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.posts.values().cloned().collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&post.author_id) {
            return Err(Tables::foreign_key_violation(post.author_id));
        }
        tables.next_post_id += 1;

        let post = Post {
            id: tables.next_post_id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        };
        tables.posts.insert(post.id, post.clone());

        tracing::debug!(post_id = post.id, author_id = post.author_id, "Inserted post");
        Ok(post)
    }

    async fn find_with_author(&self, id: PostId) -> Result<Option<PostWithAuthor>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).and_then(|post| tables.join(post)))
    }

    async fn find_all_with_author(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.values().filter_map(|post| tables.join(post)).collect())
    }

    async fn update(
        &self,
        id: PostId,
        changes: PostChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let mut tables = self.tables.write().await;
        if let Some(author_id) = changes.author_id {
            if !tables.authors.contains_key(&author_id) {
                return Err(Tables::foreign_key_violation(author_id));
            }
        }

        let Some(post) = tables.posts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(author_id) = changes.author_id {
            post.author_id = author_id;
        }
        post.updated_at = updated_at;

        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: PostId) -> Result<bool, RepoError> {
        Ok(self.tables.write().await.posts.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let db = InMemoryDatabase::new();
        let authors = db.authors();

        let ada = authors.insert(NewAuthor::new("Ada".into())).await.unwrap();
        let grace = authors.insert(NewAuthor::new("Grace".into())).await.unwrap();

        assert_eq!(ada.id, 1);
        assert_eq!(grace.id, 2);
    }

    #[tokio::test]
    async fn test_insert_post_rejects_dangling_author() {
        let db = InMemoryDatabase::new();

        let err = db
            .posts()
            .insert(NewPost::new("T".into(), "C".into(), 99))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::ForeignKey(_)));
        assert!(db.posts().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascade_counts_posts() {
        let db = InMemoryDatabase::new();
        let author = db.authors().insert(NewAuthor::new("Ada".into())).await.unwrap();
        for title in ["a", "b", "c"] {
            db.posts()
                .insert(NewPost::new(title.into(), "C".into(), author.id))
                .await
                .unwrap();
        }

        assert_eq!(db.authors().delete_cascade(author.id).await.unwrap(), Some(3));
        assert_eq!(db.authors().delete_cascade(author.id).await.unwrap(), None);
    }
}
