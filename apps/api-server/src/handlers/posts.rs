//! Post handlers.

use actix_web::{HttpResponse, web};

use quire_core::domain::PostChanges;
use quire_shared::ApiResponse;
use quire_shared::dto::{CreatePostRequest, DeleteResponse, UpdatePostRequest};

use super::{post_response, post_with_author_response};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .create(req.title, req.content, req.author_id)
        .await?;

    tracing::info!(post_id = post.id, author_id = post.author_id, "Post created");
    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post))))
}

/// GET /api/posts - every post with its author.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<_> = state
        .posts
        .list()
        .await?
        .into_iter()
        .map(post_with_author_response)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{id} - `data: null` when there is no such post.
pub async fn get(state: web::Data<AppState>, id: web::Path<i32>) -> AppResult<HttpResponse> {
    let post = state.posts.get(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::maybe(post.map(post_with_author_response))))
}

/// PATCH /api/posts/{id}
///
/// An empty body is accepted and only refreshes `updated_at`.
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        author_id: req.author_id,
    };
    let post = state.posts.update(id.into_inner(), changes).await?;

    tracing::info!(post_id = post.id, "Post updated");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// DELETE /api/posts/{id}
pub async fn delete(state: web::Data<AppState>, id: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state.posts.delete(id).await?;

    tracing::info!(post_id = id, "Post deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DeleteResponse { success: true })))
}
