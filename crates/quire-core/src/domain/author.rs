use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to an author by the storage backend.
pub type AuthorId = i32;

/// Author entity - a writer who owns zero or more posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A validated author that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl NewAuthor {
    /// Stamp a new author with the current time.
    pub fn new(name: String) -> Self {
        Self {
            name,
            created_at: super::now(),
        }
    }
}
