/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /users 系はすべて pre-auth の配下に置く (適用自体は app.rs)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::users::{create_user, delete_user, get_user, get_user_role};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user).delete(delete_user))
        .route("/users/{user_id}/role", get(get_user_role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::middleware::auth::pre_auth::{self, PreAuthState};
    use crate::middleware::auth::responders::FailureResponders;
    use crate::repos::memory::MemoryUserStore;
    use crate::services::cache::memory::MemoryCache;
    use crate::services::users::UserService;

    fn test_app() -> Router {
        let users = Arc::new(UserService::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryCache::new()),
            Duration::from_millis(100),
            Duration::from_secs(60),
        ));

        let v1 = pre_auth::apply(
            routes(),
            PreAuthState::new(users.clone(), FailureResponders::default()),
        );

        Router::new()
            .nest("/api/v1", v1)
            .with_state(AppState::new(users))
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, "Bearer abc123");

        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn create_body() -> Value {
        json!({
            "name": "horiga",
            "description": "test user",
            "role": "developer",
            "birthday": "1999-1-5"
        })
    }

    #[tokio::test]
    async fn create_user_returns_created_and_is_readable() {
        let app = test_app();

        let (status, body) = send(app.clone(), request("POST", "/api/v1/users", Some(create_body()))).await;
        assert_eq!(status, StatusCode::CREATED);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["role"], "DEVELOPER");
        assert_eq!(body["birthday"], "1999-01-05");

        let id = body["id"].as_str().unwrap();
        let (status, body) = send(app, request("GET", &format!("/api/v1/users/{id}"), None)).await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["name"], "horiga");
    }

    #[tokio::test]
    async fn create_user_with_unknown_role_is_bad_request() {
        let mut invalid = create_body();
        invalid["role"] = json!("root");

        let (status, body) = send(test_app(), request("POST", "/api/v1/users", Some(invalid))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["code"], "INVALID_USER");
    }

    #[tokio::test]
    async fn get_missing_user_is_not_found() {
        let (status, body) = send(test_app(), request("GET", "/api/v1/users/missing", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn delete_user_maps_removal_to_204_then_404() {
        let app = test_app();

        let (_, body) = send(app.clone(), request("POST", "/api/v1/users", Some(create_body()))).await;
        let body: Value = serde_json::from_slice(&body).unwrap();
        let uri = format!("/api/v1/users/{}", body["id"].as_str().unwrap());

        let (status, _) = send(app.clone(), request("DELETE", &uri, None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(app, request("DELETE", &uri, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn role_endpoint_falls_back_to_guest_for_unknown_id() {
        let (status, body) = send(test_app(), request("GET", "/api/v1/users/nobody/role", None)).await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"role": "GUEST"}));
    }
}
