use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, AuthorId};

/// Identifier assigned to a post by the storage backend.
pub type PostId = i32;

/// Post entity - a blog article written by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: AuthorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// The `updated_at` value for the next mutation of this post.
    ///
    /// Always strictly later than the current `updated_at`, even when the
    /// clock has not advanced by a full microsecond since the last write.
    pub fn next_updated_at(&self) -> DateTime<Utc> {
        let now = super::now();
        if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        }
    }
}

/// A post together with the author it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: Author,
}

/// A validated post that has not been persisted yet.
///
/// Both timestamps are taken from the same instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: AuthorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(title: String, content: String, author_id: AuthorId) -> Self {
        let now = super::now();
        Self {
            title,
            content,
            author_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a post. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<AuthorId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_at(updated_at: DateTime<Utc>) -> Post {
        Post {
            id: 1,
            title: "T".to_string(),
            content: "C".to_string(),
            author_id: 1,
            created_at: updated_at,
            updated_at,
        }
    }

    #[test]
    fn test_next_updated_at_is_strictly_later() {
        let post = post_at(super::super::now());
        assert!(post.next_updated_at() > post.updated_at);
    }

    #[test]
    fn test_next_updated_at_survives_clock_behind_stored_value() {
        let future = super::super::now() + Duration::hours(1);
        let post = post_at(future);
        assert_eq!(post.next_updated_at(), future + Duration::microseconds(1));
    }

    #[test]
    fn test_new_post_timestamps_match() {
        let post = NewPost::new("T".into(), "C".into(), 7);
        assert_eq!(post.created_at, post.updated_at);
    }
}
