//! Author handlers.

use actix_web::{HttpResponse, web};

use quire_shared::ApiResponse;
use quire_shared::dto::{CreateAuthorRequest, DeleteResponse, UpdateAuthorRequest};

use super::author_response;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/authors
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateAuthorRequest>,
) -> AppResult<HttpResponse> {
    let author = state.authors.create(body.into_inner().name).await?;

    tracing::info!(author_id = author.id, "Author created");
    Ok(HttpResponse::Created().json(ApiResponse::ok(author_response(author))))
}

/// GET /api/authors
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let authors: Vec<_> = state
        .authors
        .list()
        .await?
        .into_iter()
        .map(author_response)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(authors)))
}

/// GET /api/authors/{id} - `data: null` when there is no such author.
pub async fn get(state: web::Data<AppState>, id: web::Path<i32>) -> AppResult<HttpResponse> {
    let author = state.authors.get(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::maybe(author.map(author_response))))
}

/// PATCH /api/authors/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    body: web::Json<UpdateAuthorRequest>,
) -> AppResult<HttpResponse> {
    let author = state
        .authors
        .update(id.into_inner(), body.into_inner().name)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(author_response(author))))
}

/// DELETE /api/authors/{id} - also removes every post by the author.
pub async fn delete(state: web::Data<AppState>, id: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let posts_removed = state.authors.delete(id).await?;

    tracing::info!(author_id = id, posts_removed, "Author deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        DeleteResponse { success: true },
        format!("Author {id} deleted along with {posts_removed} post(s)"),
    )))
}
