//! Front end serving and response headers.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use folio_core::MemStorage;
use folio_web::{AppState, ServerConfig};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt; // for .oneshot()

fn app_serving(dir: &TempDir) -> axum::Router {
    let mut config = ServerConfig::default();
    config.auth.jwt_secret = common::JWT_SECRET.to_string();
    config.static_files.dir = Some(dir.path().to_path_buf());
    folio_web::app(AppState::new(config, Arc::new(MemStorage::new())))
}

fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
    std::fs::create_dir(tmp.path().join("assets")).unwrap();
    std::fs::write(tmp.path().join("assets").join("app.js"), "console.log(1)").unwrap();
    tmp
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

#[tokio::test]
async fn serves_existing_asset() {
    let dir = site();
    let (status, body) = get(app_serving(&dir), "/assets/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "console.log(1)");
}

#[tokio::test]
async fn client_routes_fall_back_to_index() {
    let dir = site();
    let (status, body) = get(app_serving(&dir), "/admin").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("root"));
}

#[tokio::test]
async fn api_routes_take_precedence() {
    let dir = site();
    let (status, body) = get(app_serving(&dir), "/api/visitors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"count":0}"#);
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let (app, _) = common::test_app().await;
    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
    assert!(!headers.contains_key("strict-transport-security"));
}
