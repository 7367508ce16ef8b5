use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostPatch};
use crate::error::RepoError;

/// Generic repository trait defining the entity-agnostic operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Count all stored entities.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Delete an entity by its ID. Returns `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// The store owns `id` and `created`: both are assigned on insert and never
/// rewritten by `update`.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts in the store's natural (creation) order.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Any single post, or `None` when the store is empty.
    async fn find_one(&self) -> Result<Option<Post>, RepoError>;

    /// Persist a new post.
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError>;

    /// Persist a batch of new posts.
    async fn insert_many(&self, new_posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError>;

    /// Apply a partial update. Returns `RepoError::NotFound` if absent.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError>;

    /// Remove every post. Used to reset state between test cases.
    async fn clear(&self) -> Result<u64, RepoError>;
}
