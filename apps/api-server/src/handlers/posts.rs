//! Blog post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Author, AuthorPatch, NewPost, Post, PostPatch};
use blog_core::error::RepoError;
use blog_shared::dto::{AuthorPayload, CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

/// The only place the author is flattened to `"First Last"`.
fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author: post.author.full_name(),
        title: post.title,
        content: post.content,
        created: post.created,
    }
}

fn post_not_found(id: Uuid) -> AppError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
    .into()
}

/// Maps a store miss to a not-found naming the post.
fn or_post_not_found(id: Uuid) -> impl FnOnce(RepoError) -> AppError {
    move |err| match err {
        RepoError::NotFound => post_not_found(id),
        other => other.into(),
    }
}

fn require(value: Option<String>, field: &str) -> Result<String, DomainError> {
    value.ok_or_else(|| DomainError::missing_field(field))
}

fn validate_create(req: CreatePostRequest) -> Result<NewPost, DomainError> {
    let title = require(req.title, "title")?;
    let content = require(req.content, "content")?;
    let author = req.author.ok_or_else(|| DomainError::missing_field("author"))?;

    Ok(NewPost {
        title,
        content,
        author: Author::new(
            require(author.first_name, "author.firstName")?,
            require(author.last_name, "author.lastName")?,
        ),
    })
}

fn validate_update(id: Uuid, req: UpdatePostRequest) -> Result<PostPatch, DomainError> {
    if let Some(body_id) = req.id.as_deref() {
        if Uuid::parse_str(body_id).ok() != Some(id) {
            return Err(DomainError::Validation(format!(
                "Request path id ({}) and request body id ({}) must match",
                id, body_id
            )));
        }
    }

    Ok(PostPatch {
        title: req.title,
        content: req.content,
        author: req.author.map(|AuthorPayload { first_name, last_name }| AuthorPatch {
            first_name,
            last_name,
        }),
    })
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = validate_create(body.into_inner())?;
    let post = state.posts.create(new_post).await?;

    tracing::info!(
        post_id = %post.id,
        request_id = request_id.as_str(),
        "Post created"
    );

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let patch = validate_update(id, body.into_inner())?;

    state
        .posts
        .update(id, patch)
        .await
        .map_err(or_post_not_found(id))?;

    tracing::info!(post_id = %id, request_id = request_id.as_str(), "Post updated");
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state
        .posts
        .delete(id)
        .await
        .map_err(or_post_not_found(id))?;

    tracing::info!(post_id = %id, request_id = request_id.as_str(), "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
