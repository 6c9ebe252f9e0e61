//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
    TransactionTrait, Unchanged,
};

use quire_core::domain::{Author, NewAuthor, NewPost, Post, PostChanges, PostWithAuthor};
use quire_core::error::RepoError;
use quire_core::ports::{AuthorRepository, PostRepository};

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL author repository.
pub type PostgresAuthorRepository = PostgresBaseRepository<AuthorEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// An `UPDATE ... RETURNING` that matched no row.
fn missing_row<T>(result: Result<T, DbErr>) -> Result<Option<T>, RepoError> {
    match result {
        Ok(model) => Ok(Some(model)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(map_db_err(e)),
    }
}

fn joined(row: (post::Model, Option<author::Model>)) -> Option<PostWithAuthor> {
    let (post, author) = row;
    Some(PostWithAuthor {
        post: post.into(),
        author: author?.into(),
    })
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn insert(&self, author: NewAuthor) -> Result<Author, RepoError> {
        let model = author::ActiveModel::from(author)
            .insert(self.db())
            .await
            .map_err(map_db_err)?;

        tracing::debug!(author_id = model.id, "Inserted author");
        Ok(model.into())
    }

    async fn update_name(&self, id: i32, name: String) -> Result<Option<Author>, RepoError> {
        let active = author::ActiveModel {
            id: Unchanged(id),
            name: Set(name),
            created_at: NotSet,
        };

        Ok(missing_row(active.update(self.db()).await)?.map(Into::into))
    }

    async fn delete_cascade(&self, id: i32) -> Result<Option<u64>, RepoError> {
        let txn = self.db().begin().await.map_err(map_db_err)?;

        let exists = AuthorEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_some();
        if !exists {
            txn.rollback().await.map_err(map_db_err)?;
            return Ok(None);
        }

        let posts = PostEntity::delete_many()
            .filter(post::Column::AuthorId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let removed = AuthorEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        // A concurrent delete got there first.
        if removed.rows_affected == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            return Ok(None);
        }

        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(
            author_id = id,
            posts_removed = posts.rows_affected,
            "Deleted author with cascade"
        );
        Ok(Some(posts.rows_affected))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .insert(self.db())
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, author_id = model.author_id, "Inserted post");
        Ok(model.into())
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(AuthorEntity)
            .one(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(row.and_then(joined))
    }

    async fn find_all_with_author(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let rows = PostEntity::find()
            .find_also_related(AuthorEntity)
            .order_by_asc(post::Column::Id)
            .all(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().filter_map(joined).collect())
    }

    async fn update(
        &self,
        id: i32,
        changes: PostChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let active = post::changes_model(id, changes, updated_at);

        Ok(missing_row(active.update(self.db()).await)?.map(Into::into))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }
}
