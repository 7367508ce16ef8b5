//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set};
use uuid::Uuid;

use blog_core::domain::{NewPost, Post, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Created)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_one(&self) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Created)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = Post::create(new_post).into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        tracing::debug!(post_id = %model.id, "Post created");
        Ok(model.into())
    }

    async fn insert_many(&self, new_posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        // SeaORM rejects an empty multi-row insert.
        if new_posts.is_empty() {
            return Ok(Vec::new());
        }

        let posts: Vec<Post> = new_posts.into_iter().map(Post::create).collect();
        PostEntity::insert_many(posts.iter().cloned().map(post::ActiveModel::from))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = posts.len(), "Posts inserted");
        Ok(posts)
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        if patch.is_empty() {
            return Ok(model.into());
        }

        // `id` and `created` are left untouched.
        let mut active_model = model.into_active_model();
        if let Some(title) = patch.title {
            active_model.title = Set(title);
        }
        if let Some(content) = patch.content {
            active_model.content = Set(content);
        }
        if let Some(author) = patch.author {
            if let Some(first_name) = author.first_name {
                active_model.author_first_name = Set(first_name);
            }
            if let Some(last_name) = author.last_name {
                active_model.author_last_name = Set(last_name);
            }
        }

        let updated = active_model.update(&self.db).await.map_err(map_db_err)?;
        tracing::debug!(post_id = %id, "Post updated");
        Ok(updated.into())
    }

    async fn clear(&self) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::info!(removed = result.rows_affected, "Post collection cleared");
        Ok(result.rows_affected)
    }
}
