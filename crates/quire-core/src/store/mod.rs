//! Stores - the operations exposed to the outside world.
//!
//! Each store wraps repository ports and layers validation and the
//! author/post integrity rules on top of them.

mod author;
mod integrity;
mod post;

pub use author::AuthorStore;
pub use post::PostStore;
