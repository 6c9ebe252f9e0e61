//! Domain entities - the core business objects.

mod author;
mod post;
mod validation;

use chrono::{DateTime, SubsecRound, Utc};

pub use author::{Author, AuthorId, NewAuthor};
pub use post::{NewPost, Post, PostChanges, PostId, PostWithAuthor};
pub use validation::require_text;

/// Current time at the precision the database keeps (microseconds).
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
