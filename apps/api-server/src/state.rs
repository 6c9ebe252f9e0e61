//! Application state - shared across all handlers.

use std::sync::Arc;

use quire_core::error::RepoError;
use quire_core::{AuthorStore, PostStore};
use quire_infra::{DatabaseConfig, InMemoryDatabase};

#[cfg(feature = "postgres")]
use quire_infra::database::{self, DbConn};
#[cfg(feature = "postgres")]
use quire_infra::{PostgresAuthorRepository, PostgresPostRepository};

/// Backend holding the authors and posts tables.
#[derive(Clone)]
pub enum Storage {
    Memory,
    #[cfg(feature = "postgres")]
    Postgres(Arc<DbConn>),
}

impl Storage {
    pub fn name(&self) -> &'static str {
        match self {
            Storage::Memory => "memory",
            #[cfg(feature = "postgres")]
            Storage::Postgres(_) => "postgres",
        }
    }

    /// Verify the backend is reachable.
    pub async fn check(&self) -> Result<(), RepoError> {
        match self {
            Storage::Memory => Ok(()),
            #[cfg(feature = "postgres")]
            Storage::Postgres(db) => database::ping(db).await,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authors: AuthorStore,
    pub posts: PostStore,
    pub storage: Storage,
}

impl AppState {
    /// Build the application state for the configured backend.
    ///
    /// Without a database URL the server keeps everything in memory. A URL
    /// that cannot be connected to is a startup failure.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> anyhow::Result<Self> {
        let state = match db_config {
            #[cfg(feature = "postgres")]
            Some(config) => Self::postgres(database::connect(config).await?),
            #[cfg(not(feature = "postgres"))]
            Some(_) => {
                tracing::warn!(
                    "DATABASE_URL is set but the postgres feature is disabled - using in-memory storage"
                );
                Self::in_memory()
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        tracing::info!(storage = state.storage.name(), "Application state initialized");
        Ok(state)
    }

    pub fn in_memory() -> Self {
        let db = InMemoryDatabase::new();
        let authors = Arc::new(db.authors());

        Self {
            authors: AuthorStore::new(authors.clone()),
            posts: PostStore::new(Arc::new(db.posts()), authors),
            storage: Storage::Memory,
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(conn: DbConn) -> Self {
        let conn = Arc::new(conn);
        let authors = Arc::new(PostgresAuthorRepository::new(conn.clone()));

        Self {
            authors: AuthorStore::new(authors.clone()),
            posts: PostStore::new(
                Arc::new(PostgresPostRepository::new(conn.clone())),
                authors,
            ),
            storage: Storage::Postgres(conn),
        }
    }
}
