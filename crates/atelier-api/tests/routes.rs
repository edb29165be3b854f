//! Router-level tests that stop before the database: extractor
//! rejections, admin login, and media serving.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use atelier_api::{AppState, build_app};
use atelier_auth::PasswordHasher;
use atelier_core::config::AppConfig;
use atelier_core::traits::StorageProvider;
use atelier_database::DatabasePool;
use atelier_storage::{LocalStorageProvider, MediaStore};

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

struct Harness {
    app: Router,
    state: AppState,
    provider: Arc<LocalStorageProvider>,
    _dir: tempfile::TempDir,
}

async fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let mut config: AppConfig = serde_json::from_value(serde_json::json!({
        "database": { "url": "postgres://localhost/atelier_test" }
    }))
    .unwrap();
    config.auth.jwt_secret = "route-test-secret".to_string();
    config.auth.admin_password_hash = PasswordHasher::new().hash_password("letmein").unwrap();
    config.storage.root_path = dir.path().to_string_lossy().into_owned();

    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .unwrap();
    let provider = Arc::new(
        LocalStorageProvider::new(&config.storage.root_path)
            .await
            .unwrap(),
    );
    let media = MediaStore::new(provider.clone(), config.storage.clone());
    let state = AppState::new(config, DatabasePool::from_pool(pool), media);

    Harness {
        app: build_app(state.clone()),
        state,
        provider,
        _dir: dir,
    }
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_uses_success_envelope() {
    let h = harness().await;
    let response = h.app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_admin_routes_require_bearer_token() {
    let h = harness().await;

    let response = h
        .app
        .clone()
        .oneshot(get("/api/admin/galleries/picker"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "UNAUTHORIZED");

    let forged = Request::builder()
        .method("DELETE")
        .uri(format!("/api/admin/galleries/{}", Uuid::new_v4()))
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let response = h.app.oneshot(forged).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_login() {
    let h = harness().await;

    let wrong = json_request(
        "POST",
        "/api/admin/login",
        r#"{"username": "admin", "password": "nope"}"#,
    );
    let response = h.app.clone().oneshot(wrong).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let right = json_request(
        "POST",
        "/api/admin/login",
        r#"{"username": "admin", "password": "letmein"}"#,
    );
    let response = h.app.oneshot(right).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let token = body["data"]["access_token"].as_str().unwrap();
    let claims = h.state.jwt_decoder.decode_access_token(token).unwrap();
    assert_eq!(claims.username(), "admin");
}

#[tokio::test]
async fn test_verify_rejects_empty_password_before_lookup() {
    let h = harness().await;
    let uri = format!("/api/galleries/{}/verify", Uuid::new_v4());

    let response = h
        .app
        .clone()
        .oneshot(json_request("POST", &uri, r#"{"password": ""}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "VALIDATION_ERROR");

    let response = h
        .app
        .oneshot(json_request("POST", &uri, "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_gallery_id_is_bad_request() {
    let h = harness().await;
    let response = h.app.oneshot(get("/api/galleries/not-a-uuid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_media_is_streamed_with_content_type() {
    let h = harness().await;
    h.provider
        .write("artworks/dawn.png", "png-bytes".into())
        .await
        .unwrap();

    let response = h
        .app
        .clone()
        .oneshot(get("/media/artworks/dawn.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"png-bytes");

    let missing = h.app.oneshot(get("/media/artworks/gone.png")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
