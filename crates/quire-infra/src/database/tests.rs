use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use quire_core::domain::{Author, Post, PostChanges};
use quire_core::ports::{AuthorRepository, BaseRepository, PostRepository};

use crate::database::entity::{author, post};
use crate::database::postgres_repo::{PostgresAuthorRepository, PostgresPostRepository};

fn author_model(id: i32, name: &str) -> author::Model {
    author::Model {
        id,
        name: name.to_owned(),
        created_at: Utc::now().into(),
    }
}

fn post_model(id: i32, author_id: i32) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: "Test Post".to_owned(),
        content: "Content".to_owned(),
        author_id,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(1, 7)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(1).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 1);
    assert_eq!(post.author_id, 7);
}

#[tokio::test]
async fn test_find_post_with_author() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![(post_model(3, 7), author_model(7, "Ada"))]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let joined = repo.find_with_author(3).await.unwrap().unwrap();
    assert_eq!(joined.post.id, 3);
    assert_eq!(joined.author.id, 7);
    assert_eq!(joined.author.name, "Ada");
}

#[tokio::test]
async fn test_list_authors() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![author_model(1, "Ada"), author_model(2, "Grace")]])
        .into_connection();

    let repo = PostgresAuthorRepository::new(db);

    let authors: Vec<Author> = repo.find_all().await.unwrap();
    let names: Vec<_> = authors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Ada", "Grace"]);
}

#[tokio::test]
async fn test_update_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let changes = PostChanges {
        title: Some("New".to_owned()),
        ..Default::default()
    };
    let result = repo.update(42, changes, Utc::now()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_cascade_reports_removed_posts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![author_model(1, "Ada")]])
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();

    let repo = PostgresAuthorRepository::new(db);

    assert_eq!(repo.delete_cascade(1).await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_delete_cascade_missing_author() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<author::Model>::new()])
        .into_connection();

    let repo = PostgresAuthorRepository::new(db);

    assert_eq!(repo.delete_cascade(9).await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_cascade_author_removed_concurrently() {
    // The author is still visible to the existence check, but the DELETE
    // finds nothing because another transaction removed it.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![author_model(1, "Ada")]])
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresAuthorRepository::new(db);

    assert_eq!(repo.delete_cascade(1).await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(!repo.delete(5).await.unwrap());
}
