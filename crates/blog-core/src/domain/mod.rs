//! Domain entities - the core business objects.

mod post;

pub use post::{Author, AuthorPatch, NewPost, Post, PostPatch};
