//! HTTP handlers and route configuration.

mod authors;
mod health;
mod posts;

use actix_web::web;

use quire_core::domain::{Author, Post, PostWithAuthor};
use quire_shared::dto::{AuthorResponse, PostResponse, PostWithAuthorResponse};

use crate::middleware::error::{json_error_handler, path_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/authors")
                        .route("", web::get().to(authors::list))
                        .route("", web::post().to(authors::create))
                        .route("/{id}", web::get().to(authors::get))
                        .route("/{id}", web::patch().to(authors::update))
                        .route("/{id}", web::delete().to(authors::delete)),
                )
                .service(
                    web::scope("/posts")
                        .route("", web::get().to(posts::list))
                        .route("", web::post().to(posts::create))
                        .route("/{id}", web::get().to(posts::get))
                        .route("/{id}", web::patch().to(posts::update))
                        .route("/{id}", web::delete().to(posts::delete)),
                ),
        );
}

fn author_response(author: Author) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        name: author.name,
        created_at: author.created_at,
    }
}

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author_id: post.author_id,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn post_with_author_response(joined: PostWithAuthor) -> PostWithAuthorResponse {
    PostWithAuthorResponse {
        post: post_response(joined.post),
        author: author_response(joined.author),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use quire_shared::ApiResponse;
    use quire_shared::dto::{AuthorResponse, PostResponse, PostWithAuthorResponse};

    use super::*;
    use crate::state::AppState;

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn new_author(name: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/authors")
            .set_json(json!({ "name": name }))
    }

    fn new_post(title: &str, author_id: i32) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": title, "content": "Body", "author_id": author_id }))
    }

    #[actix_web::test]
    async fn test_health_reports_memory_storage() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[actix_web::test]
    async fn test_create_author_returns_created() {
        let app = test_app!();

        let resp = test::call_service(&app, new_author("Ada").to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: ApiResponse<AuthorResponse> = test::read_body_json(resp).await;
        let author = body.data.unwrap();
        assert_eq!(author.id, 1);
        assert_eq!(author.name, "Ada");
    }

    #[actix_web::test]
    async fn test_blank_author_name_is_bad_request() {
        let app = test_app!();

        let resp = test::call_service(&app, new_author("  ").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["detail"], "name must not be empty");
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "T", "content": "C", "author_id": "one" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_non_numeric_id_is_bad_request() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/api/posts/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_missing_author_lookup_returns_null_data() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/api/authors/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert!(body["data"].is_null());
    }

    #[actix_web::test]
    async fn test_update_missing_author_is_not_found() {
        let app = test_app!();

        let req = test::TestRequest::patch()
            .uri("/api/authors/42")
            .set_json(json!({ "name": "Nobody" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_create_post_for_missing_author_is_not_found() {
        let app = test_app!();

        let resp = test::call_service(&app, new_post("T", 5).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Author with id 5 not found");
    }

    #[actix_web::test]
    async fn test_post_lifecycle_with_cascade() {
        let app = test_app!();
        let body: ApiResponse<AuthorResponse> =
            test::call_and_read_body_json(&app, new_author("Ada").to_request()).await;
        let ada = body.data.unwrap();
        let body: ApiResponse<PostResponse> =
            test::call_and_read_body_json(&app, new_post("T", ada.id).to_request()).await;
        let post = body.data.unwrap();
        assert_eq!(post.created_at, post.updated_at);

        let req = test::TestRequest::patch()
            .uri(&format!("/api/posts/{}", post.id))
            .set_json(json!({ "title": "T2" }))
            .to_request();
        let body: ApiResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;
        let updated = body.data.unwrap();
        assert_eq!(updated.title, "T2");
        assert_eq!(updated.content, "Body");
        assert!(updated.updated_at > post.updated_at);

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: ApiResponse<Vec<PostWithAuthorResponse>> =
            test::call_and_read_body_json(&app, req).await;
        let listed = body.data.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].author.name, "Ada");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/authors/{}", ada.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["success"], true);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", post.id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"].is_null());
    }

    #[actix_web::test]
    async fn test_delete_post_twice() {
        let app = test_app!();
        let body: ApiResponse<AuthorResponse> =
            test::call_and_read_body_json(&app, new_author("Ada").to_request()).await;
        let ada = body.data.unwrap();
        let body: ApiResponse<PostResponse> =
            test::call_and_read_body_json(&app, new_post("T", ada.id).to_request()).await;
        let post = body.data.unwrap();
        let uri = format!("/api/posts/{}", post.id);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
